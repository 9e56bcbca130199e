use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use wikiscrape_web::{scrape_url, Article};

use crate::error::{ApiError, EMPTY_CONTENT};
use crate::state::AppState;

/// Upper bound accepted for a page URL.
pub const MAX_URL_CHARS: usize = 2048;

#[derive(Debug, Deserialize)]
pub struct ScrapeRequest {
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct AskRequest {
    pub url: String,
    pub question: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AskResponse {
    pub answer: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

fn validate_url(url: &str) -> Result<(), ApiError> {
    let len = url.chars().count();
    if len == 0 || len > MAX_URL_CHARS {
        return Err(ApiError::Validation(format!(
            "url must be between 1 and {MAX_URL_CHARS} characters"
        )));
    }
    Ok(())
}

pub async fn scrape(
    State(state): State<AppState>,
    payload: Result<Json<ScrapeRequest>, JsonRejection>,
) -> Result<Json<Article>, ApiError> {
    let Json(req) = payload?;
    validate_url(&req.url)?;

    let article = scrape_url(state.fetcher.as_ref(), &req.url).await?;
    Ok(Json(article))
}

pub async fn ask(
    State(state): State<AppState>,
    payload: Result<Json<AskRequest>, JsonRejection>,
) -> Result<Json<AskResponse>, ApiError> {
    let Json(req) = payload?;
    validate_url(&req.url)?;
    if req.question.is_empty() {
        return Err(ApiError::Validation("question must not be empty".into()));
    }

    let article = scrape_url(state.fetcher.as_ref(), &req.url).await?;
    if article.content.is_empty() {
        return Err(ApiError::BadRequest(EMPTY_CONTENT.into()));
    }

    let Some(qa) = state.qa.as_ref() else {
        tracing::warn!("ask.no_llm_configured");
        return Err(ApiError::Ai);
    };
    let answer = qa.answer(&article.content, &req.question).await?;
    Ok(Json(AskResponse { answer }))
}

pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_length_bounds() {
        assert!(validate_url("").is_err());
        assert!(validate_url("https://en.wikipedia.org/wiki/Nico_Ditch").is_ok());
        assert!(validate_url(&"a".repeat(MAX_URL_CHARS)).is_ok());
        assert!(validate_url(&"a".repeat(MAX_URL_CHARS + 1)).is_err());
        // counted in characters, not bytes
        assert!(validate_url(&"é".repeat(MAX_URL_CHARS)).is_ok());
    }
}
