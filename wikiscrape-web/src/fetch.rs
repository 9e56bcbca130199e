use async_trait::async_trait;
use std::time::Duration;
use url::Url;
use wikiscrape_common::{Result, WikiscrapeError};
use wikiscrape_http::{HttpClient, RequestOpts};

use crate::extract::{extract_article, Article};
use crate::namespaces::WIKI_ORIGIN;

/// Supplies raw page HTML for a URL.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch_html(&self, url: &str) -> Result<String>;
}

/// [`PageFetcher`] backed by the shared [`HttpClient`].
#[derive(Clone)]
pub struct HttpPageFetcher {
    http: HttpClient,
}

impl HttpPageFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let http = HttpClient::with_user_agent(WIKI_ORIGIN, user_agent)
            .map_err(|e| WikiscrapeError::Config(format!("HttpClient init failed: {e}")))?;
        Ok(Self { http })
    }

    pub fn from_client(http: HttpClient) -> Self {
        Self { http }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.http = self.http.with_timeout(timeout);
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.http = self.http.with_retries(retries);
        self
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_html(&self, url: &str) -> Result<String> {
        let target = Url::parse(url.trim())
            .map_err(|e| WikiscrapeError::Fetch(format!("invalid URL '{url}': {e}")))?;
        if !matches!(target.scheme(), "http" | "https") {
            return Err(WikiscrapeError::Fetch(format!(
                "unsupported URL scheme '{}'",
                target.scheme()
            )));
        }

        let opts = RequestOpts {
            allow_absolute: true,
            ..Default::default()
        };
        let html = self
            .http
            .get_text(target.as_str(), opts)
            .await
            .map_err(|e| {
                tracing::warn!(url = %target, error = %e, "fetch.failed");
                WikiscrapeError::Fetch(e.to_string())
            })?;

        tracing::debug!(
            host = target.host_str().unwrap_or("-"),
            path = target.path(),
            bytes = html.len(),
            checksum = %blake3::hash(html.as_bytes()).to_hex(),
            "fetch.page"
        );
        Ok(html)
    }
}

/// Fetch `url` and extract its [`Article`].
pub async fn scrape_url(fetcher: &dyn PageFetcher, url: &str) -> Result<Article> {
    let html = fetcher.fetch_html(url).await?;
    let article = extract_article(&html).inspect_err(|_| {
        tracing::warn!(url, "scrape.structure_not_found");
    })?;
    tracing::info!(
        url,
        title = %article.title,
        content_len = article.content.len(),
        categories = article.categories.len(),
        references = article.references.len(),
        "scrape.extracted"
    );
    Ok(article)
}
