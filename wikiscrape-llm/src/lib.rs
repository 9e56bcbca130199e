//! Language-model integration for answering questions about articles.
//!
//! This crate exposes a common [`traits::LlmClient`] interface, an OpenAI
//! Responses API implementation, and [`answer::QuestionAnswerer`], which
//! grounds answers in extracted article text. [`ensure_llm_ready`] builds a
//! client from a [`wikiscrape_common::LlmConfig`].
//!
//! # Examples
//! ```no_run
//! use wikiscrape_common::{LlmConfig, Result};
//! use wikiscrape_llm::{ensure_llm_ready, QuestionAnswerer};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<()> {
//! let cfg = LlmConfig::OpenAi {
//!     api_key: std::env::var("OPENAI_API_KEY").unwrap_or_default(),
//!     model: "gpt-4o-mini".into(),
//!     base_url: None,
//! };
//! let qa = QuestionAnswerer::new(ensure_llm_ready(&cfg).await?);
//! let answer = qa.answer("Nico Ditch is six miles long.", "How long is it?").await?;
//! println!("{answer}");
//! # Ok(())
//! # }
//! ```
pub mod answer;
pub mod openai;
pub mod traits;

pub use answer::{QuestionAnswerer, NO_ANSWER_FOUND};

use openai::OpenAiClient;
use std::sync::Arc;
use traits::LlmClient;
use wikiscrape_common::{LlmConfig, WikiscrapeError};

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Build the configured LLM client.
pub async fn ensure_llm_ready(
    config: &LlmConfig,
) -> wikiscrape_common::Result<Arc<dyn LlmClient + Send + Sync + 'static>> {
    match config {
        LlmConfig::None => Err(WikiscrapeError::Config("No LLM configured".to_string())),
        LlmConfig::OpenAi {
            api_key,
            model,
            base_url,
        } => {
            if api_key.trim().is_empty() {
                return Err(WikiscrapeError::Config(
                    "OpenAI API key is empty".to_string(),
                ));
            }
            let model = if model.trim().is_empty() {
                DEFAULT_OPENAI_MODEL.to_string()
            } else {
                model.clone()
            };
            let client = match base_url {
                Some(base) => OpenAiClient::with_base_url(api_key.clone(), model, base)?,
                None => OpenAiClient::new(api_key.clone(), model)?,
            };
            tracing::info!(model = client.model_name(), "llm.ready");
            Ok(Arc::new(client))
        }
    }
}
