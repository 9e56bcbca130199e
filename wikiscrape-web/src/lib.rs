//! Wikipedia page acquisition and article extraction.
//!
//! - Article extraction from rendered HTML (`extract`)
//! - Artifact cleanup for paragraph text (`clean`)
//! - Link classification tables (`namespaces`)
//! - Page fetching over HTTP (`fetch`)

pub mod clean;
pub mod extract;
pub mod fetch;
pub mod namespaces;

pub use extract::{extract_article, Article, ExtractError};
pub use fetch::{scrape_url, HttpPageFetcher, PageFetcher};
