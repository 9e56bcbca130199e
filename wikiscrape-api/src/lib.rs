//! HTTP API over article extraction and question answering.
//!
//! - `POST /scrape` `{ "url" }` returns the extracted article
//! - `POST /ask` `{ "url", "question" }` returns `{ "answer" }`
//! - `GET /health` is unauthenticated
//!
//! Failures are JSON `{ "detail": "..." }` bodies (see [`error::ApiError`]).

pub mod auth;
pub mod error;
pub mod routes;
pub mod state;

pub use auth::Credentials;
pub use error::ApiError;
pub use state::AppState;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/scrape", post(routes::scrape))
        .route("/ask", post(routes::ask))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_basic_auth,
        ));

    Router::new()
        .route("/health", get(routes::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
