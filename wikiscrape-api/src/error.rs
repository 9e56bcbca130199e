use axum::extract::rejection::JsonRejection;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use wikiscrape_common::WikiscrapeError;

pub const SCRAPE_FAILED: &str = "Failed to scrape website";
pub const AI_FAILED: &str = "Failed to get response from AI";
pub const EMPTY_CONTENT: &str = "Failed to get content from URL";
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";
pub const NOT_AUTHENTICATED: &str = "Not authenticated";

/// Error body shared by every failing route.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[derive(Debug)]
pub enum ApiError {
    /// Request body failed to parse or validate.
    Validation(String),
    /// Body was rejected before validation (bad JSON, wrong content type).
    Rejected(StatusCode, String),
    BadRequest(String),
    Unauthorized(&'static str),
    Scrape,
    Ai,
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Rejected(status, _) => *status,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Scrape | ApiError::Ai | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn detail(&self) -> String {
        match self {
            ApiError::Validation(msg)
            | ApiError::Rejected(_, msg)
            | ApiError::BadRequest(msg) => msg.clone(),
            ApiError::Unauthorized(msg) => (*msg).to_string(),
            ApiError::Scrape => SCRAPE_FAILED.to_string(),
            ApiError::Ai => AI_FAILED.to_string(),
            ApiError::Internal(_) => "Internal server error".to_string(),
        }
    }
}

impl From<WikiscrapeError> for ApiError {
    fn from(err: WikiscrapeError) -> Self {
        match err {
            WikiscrapeError::Fetch(_) | WikiscrapeError::StructureNotFound => ApiError::Scrape,
            WikiscrapeError::Llm(_) => ApiError::Ai,
            WikiscrapeError::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => ApiError::Validation(e.body_text()),
            other => ApiError::Rejected(other.status(), other.body_text()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if let ApiError::Internal(cause) = &self {
            tracing::error!(error = %cause, "api.internal_error");
        }
        let mut response = (status, Json(ErrorBody { detail: self.detail() })).into_response();
        if status == StatusCode::UNAUTHORIZED {
            response
                .headers_mut()
                .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static("Basic"));
        }
        response
    }
}
