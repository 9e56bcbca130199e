//! HTTP Basic authentication for the article routes.

use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::http::HeaderMap;
use axum::middleware::Next;
use axum::response::Response;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::error::{ApiError, INVALID_CREDENTIALS, NOT_AUTHENTICATED};
use crate::state::AppState;

/// Expected credentials, held as digests so comparison runs in constant time.
#[derive(Clone)]
pub struct Credentials {
    username: blake3::Hash,
    password: blake3::Hash,
}

impl Credentials {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: blake3::hash(username.as_bytes()),
            password: blake3::hash(password.as_bytes()),
        }
    }

    pub fn verify(&self, username: &str, password: &str) -> bool {
        // `blake3::Hash` equality is constant time; evaluate both sides.
        let user_ok = blake3::hash(username.as_bytes()) == self.username;
        let pass_ok = blake3::hash(password.as_bytes()) == self.password;
        user_ok & pass_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credentials(<redacted>)")
    }
}

/// Decode an `Authorization: Basic ...` header into `(username, password)`.
pub fn parse_basic(headers: &HeaderMap) -> Option<(String, String)> {
    let raw = headers.get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, encoded) = raw.trim().split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("basic") {
        return None;
    }
    let decoded = STANDARD.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

pub async fn require_basic_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some((username, password)) = parse_basic(request.headers()) else {
        tracing::debug!(path = %request.uri().path(), "auth.missing");
        return Err(ApiError::Unauthorized(NOT_AUTHENTICATED));
    };

    if !state.credentials.verify(&username, &password) {
        tracing::warn!(path = %request.uri().path(), "auth.rejected");
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS));
    }

    Ok(next.run(request).await)
}
