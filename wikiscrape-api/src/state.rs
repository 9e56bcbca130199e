use std::sync::Arc;

use wikiscrape_llm::QuestionAnswerer;
use wikiscrape_web::PageFetcher;

use crate::auth::Credentials;

/// Shared handles for every request.
#[derive(Clone)]
pub struct AppState {
    pub fetcher: Arc<dyn PageFetcher>,
    /// `None` when no language model is configured; `/ask` then fails.
    pub qa: Option<Arc<QuestionAnswerer>>,
    pub credentials: Arc<Credentials>,
}

impl AppState {
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        qa: Option<QuestionAnswerer>,
        credentials: Credentials,
    ) -> Self {
        Self {
            fetcher,
            qa: qa.map(Arc::new),
            credentials: Arc::new(credentials),
        }
    }
}
