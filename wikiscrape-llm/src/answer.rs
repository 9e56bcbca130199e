//! Question answering grounded in extracted article text.

use std::sync::Arc;

use wikiscrape_common::{Result, WikiscrapeError};

use crate::traits::LlmClient;

/// Returned when the model produces no text.
pub const NO_ANSWER_FOUND: &str = "No answer found in content";

pub const EMPTY_INPUT_MESSAGE: &str = "Content and question cannot be empty";

const SYSTEM_PROMPT: &str = "You are a helpful assistant that answers questions based on provided Wikipedia content. Only use the provided content to answer questions.";

fn user_prompt(content: &str, question: &str) -> String {
    format!(
        "Based on the following Wikipedia content, please answer the question.\n\
         Answer directly and concisely. If the answer cannot be found in the content, say so.\n\
         \n\
         Content:\n\
         {content}\n\
         \n\
         Question: {question}"
    )
}

/// Answers questions about article content through an [`LlmClient`].
#[derive(Clone)]
pub struct QuestionAnswerer {
    client: Arc<dyn LlmClient>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
}

impl QuestionAnswerer {
    pub fn new(client: Arc<dyn LlmClient>) -> Self {
        Self {
            client,
            max_tokens: None,
            temperature: None,
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn model_name(&self) -> &str {
        self.client.model_name()
    }

    /// Answer `question` using only `content`.
    ///
    /// Upstream failures surface as [`WikiscrapeError::Llm`]; an empty reply
    /// becomes [`NO_ANSWER_FOUND`].
    pub async fn answer(&self, content: &str, question: &str) -> Result<String> {
        if content.is_empty() || question.is_empty() {
            return Err(WikiscrapeError::InvalidInput(EMPTY_INPUT_MESSAGE.to_string()));
        }

        let prompt = user_prompt(content, question);
        let response = self
            .client
            .generate(
                &prompt,
                Some(SYSTEM_PROMPT),
                self.max_tokens,
                self.temperature,
            )
            .await
            .map_err(|e| match e {
                WikiscrapeError::Llm(_) => e,
                other => WikiscrapeError::Llm(other.to_string()),
            })
            .inspect_err(|e| tracing::warn!(model = self.model_name(), error = %e, "qa.failed"))?;

        if response.text.trim().is_empty() {
            tracing::info!(model = self.model_name(), "qa.no_answer");
            return Ok(NO_ANSWER_FOUND.to_string());
        }

        tracing::info!(
            model = self.model_name(),
            answer_len = response.text.len(),
            tokens = response.tokens_used,
            "qa.answered"
        );
        Ok(response.text)
    }
}
