//! Structured article extraction from rendered Wikipedia HTML.
//!
//! The heuristics target current MediaWiki markup:
//!
//! - title: `#firstHeading`
//! - body: direct `<p>` / `.mw-heading` children of
//!   `#mw-content-text .mw-parser-output`, up to the last non-empty paragraph
//! - lead image: first `<img>` of the first `table.infobox`
//! - categories: links inside `#mw-normal-catlinks`
//! - references: article links inside the parser output
//!
//! Title, content and lead image are required; categories and references
//! degrade to empty lists.

use scraper::{ElementRef, Html, Selector};
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;
use wikiscrape_common::WikiscrapeError;

use crate::clean::clean_text;
use crate::namespaces::{absolute_wiki_url, is_category_label_link, is_reference_candidate};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static CSS selector")
}

static FIRST_HEADING: LazyLock<Selector> = LazyLock::new(|| selector("#firstHeading"));
static CONTENT_TEXT: LazyLock<Selector> = LazyLock::new(|| selector("#mw-content-text"));
static PARSER_OUTPUT: LazyLock<Selector> = LazyLock::new(|| selector(".mw-parser-output"));
static INFOBOX: LazyLock<Selector> = LazyLock::new(|| selector("table.infobox"));
static IMG: LazyLock<Selector> = LazyLock::new(|| selector("img"));
static CATLINKS: LazyLock<Selector> = LazyLock::new(|| selector("#mw-normal-catlinks"));
static ANCHOR: LazyLock<Selector> = LazyLock::new(|| selector("a"));

const HEADING_CLASS: &str = "mw-heading";

/// Structured data pulled from one article page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    /// Lead and body text, one paragraph or heading per line.
    pub content: String,
    pub image_url: String,
    pub categories: Vec<String>,
    pub references: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ExtractError {
    /// Title, content or lead image could not be located.
    #[error("insufficient article structure")]
    StructureNotFound,
}

impl From<ExtractError> for WikiscrapeError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::StructureNotFound => WikiscrapeError::StructureNotFound,
        }
    }
}

/// Extract an [`Article`] from raw page HTML.
///
/// Pure function of its input: the parsed tree lives only for this call.
///
/// ```
/// use wikiscrape_web::extract::extract_article;
///
/// let html = r#"
///   <h1 id="firstHeading">Nico Ditch</h1>
///   <div id="mw-content-text"><div class="mw-parser-output">
///     <table class="infobox"><tr><td><img src="//upload.example/ditch.jpg"></td></tr></table>
///     <p>Nico Ditch is a linear earthwork.[1]</p>
///   </div></div>"#;
///
/// let article = extract_article(html).unwrap();
/// assert_eq!(article.title, "Nico Ditch");
/// assert_eq!(article.content, "Nico Ditch is a linear earthwork.");
/// assert_eq!(article.image_url, "https://upload.example/ditch.jpg");
/// ```
pub fn extract_article(html: &str) -> Result<Article, ExtractError> {
    let document = Html::parse_document(html);

    let title = find_title(&document);
    let content = find_content(&document);
    let image_url = find_lead_image_url(&document);
    let categories = find_categories(&document);
    let references = find_references(&document);

    match (title, content, image_url) {
        (Some(title), Some(content), Some(image_url)) => Ok(Article {
            title,
            content,
            image_url,
            categories,
            references,
        }),
        (title, content, image_url) => {
            tracing::debug!(
                has_title = title.is_some(),
                has_content = content.is_some(),
                has_image = image_url.is_some(),
                "extract.structure_not_found"
            );
            Err(ExtractError::StructureNotFound)
        }
    }
}

fn element_text(el: &ElementRef<'_>) -> String {
    el.text().collect()
}

fn is_paragraph(el: &ElementRef<'_>) -> bool {
    el.value().name() == "p"
}

fn is_heading(el: &ElementRef<'_>) -> bool {
    el.value().classes().any(|c| c == HEADING_CLASS)
}

fn find_title(document: &Html) -> Option<String> {
    document
        .select(&FIRST_HEADING)
        .next()
        .map(|h| element_text(&h).trim().to_string())
}

fn find_parser_output(document: &Html) -> Option<ElementRef<'_>> {
    document
        .select(&CONTENT_TEXT)
        .next()?
        .select(&PARSER_OUTPUT)
        .next()
}

fn find_content(document: &Html) -> Option<String> {
    let body = find_parser_output(document)?;
    let children: Vec<ElementRef<'_>> = body.children().filter_map(ElementRef::wrap).collect();

    // Trailing sections ("See also", "References", ...) follow the last real
    // paragraph, so it bounds the walk.
    let last = children
        .iter()
        .rposition(|c| is_paragraph(c) && !element_text(c).trim().is_empty())?;

    let fragments: Vec<String> = children[..=last]
        .iter()
        .filter(|c| is_paragraph(c) || is_heading(c))
        .filter_map(|c| {
            let cleaned = clean_text(element_text(c).trim());
            (!cleaned.is_empty()).then_some(cleaned)
        })
        .collect();

    if fragments.is_empty() {
        return None;
    }
    Some(fragments.join("\n"))
}

fn find_lead_image_url(document: &Html) -> Option<String> {
    let infobox = document.select(&INFOBOX).next()?;
    let img = infobox.select(&IMG).next()?;
    // MediaWiki emits protocol-relative sources.
    let src = img.value().attr("src")?;
    Some(format!("https:{src}"))
}

fn find_categories(document: &Html) -> Vec<String> {
    let Some(catlinks) = document.select(&CATLINKS).next() else {
        return Vec::new();
    };
    catlinks
        .select(&ANCHOR)
        .filter(|a| !is_category_label_link(a.value().attr("href").unwrap_or("")))
        .map(|a| element_text(&a))
        .collect()
}

fn find_references(document: &Html) -> Vec<String> {
    let Some(body) = find_parser_output(document) else {
        return Vec::new();
    };
    body.select(&ANCHOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| is_reference_candidate(href))
        .map(absolute_wiki_url)
        .collect()
}
