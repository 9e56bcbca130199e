//! Common types and utilities shared across wikiscrape crates.
//!
//! This crate defines the workspace-wide error type, the LLM provider
//! configuration, and observability helpers. It stays dependency-light so
//! that every other crate can depend on it.
//!
//! # Overview
//!
//! - [`WikiscrapeError`] and [`Result`]: shared error handling
//! - [`LlmConfig`]: provider-agnostic LLM configuration
//! - [`observability`]: centralised tracing/logging initialisation
//!
//! # Examples
//!
//! ```rust
//! use wikiscrape_common::{LlmConfig, WikiscrapeError};
//!
//! let cfg = LlmConfig::default();
//! assert!(matches!(cfg, LlmConfig::None));
//!
//! let err = WikiscrapeError::StructureNotFound;
//! assert_eq!(err.to_string(), "insufficient article structure");
//! ```
use serde::{Deserialize, Serialize};

pub mod observability;

/// Configuration for the language-model provider behind question answering.
///
/// See the `wikiscrape-llm` crate for the concrete client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LlmConfig {
    OpenAi {
        api_key: String,
        model: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        base_url: Option<String>,
    },
    None,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self::None
    }
}

/// Error types used across the wikiscrape workspace.
#[derive(thiserror::Error, Debug)]
pub enum WikiscrapeError {
    /// The article page could not be downloaded.
    #[error("fetch failed: {0}")]
    Fetch(String),

    /// Title, content or lead image could not be located in the page.
    #[error("insufficient article structure")]
    StructureNotFound,

    /// The language-model provider failed to answer.
    #[error("AI service failure: {0}")]
    Llm(String),

    /// Caller supplied empty or otherwise unusable input.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Configuration was incomplete or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

/// Convenient alias for results that use [`WikiscrapeError`].
pub type Result<T> = std::result::Result<T, WikiscrapeError>;
