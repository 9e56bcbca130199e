use std::time::Duration;

use anyhow::{Context, Result};
use wikiscrape_common::observability::LogConfig;
use wikiscrape_config::WikiscrapeConfig;
use wikiscrape_llm::{QuestionAnswerer, ensure_llm_ready};
use wikiscrape_web::HttpPageFetcher;

pub fn log_config(cfg: &WikiscrapeConfig) -> LogConfig {
    LogConfig {
        app_name: "wikiscrape",
        log_dir: cfg.logging.dir.clone(),
        emit_stderr: cfg.logging.emit_stderr,
        format: cfg.logging.format,
        default_filter: cfg.logging.filter.clone(),
    }
}

pub fn build_fetcher(cfg: &WikiscrapeConfig) -> Result<HttpPageFetcher> {
    let fetcher = HttpPageFetcher::new(&cfg.fetch.user_agent)
        .context("failed to build page fetcher")?
        .with_timeout(Duration::from_secs(cfg.fetch.timeout_secs))
        .with_retries(cfg.fetch.retries);
    Ok(fetcher)
}

/// `Ok(None)` when no provider token is configured.
pub async fn build_answerer(cfg: &WikiscrapeConfig) -> Result<Option<QuestionAnswerer>> {
    let provider = cfg.llm.to_provider();
    if matches!(provider, wikiscrape_common::LlmConfig::None) {
        return Ok(None);
    }
    let client = ensure_llm_ready(&provider)
        .await
        .context("failed to initialise LLM client")?;
    let qa = QuestionAnswerer::new(client)
        .with_max_tokens(cfg.llm.max_tokens())
        .with_temperature(cfg.llm.temperature());
    Ok(Some(qa))
}

pub async fn require_answerer(cfg: &WikiscrapeConfig) -> Result<QuestionAnswerer> {
    build_answerer(cfg)
        .await?
        .context("no LLM configured; set OPENAI_API_KEY or llm.auth_token")
}
