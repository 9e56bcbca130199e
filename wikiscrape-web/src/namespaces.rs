//! Link classification for English Wikipedia hrefs.
//!
//! The exclusion policy lives in constant tables so that it can be audited
//! and tested on its own, independent of any parsed document.

/// Origin prepended to relative `/wiki/...` hrefs.
pub const WIKI_ORIGIN: &str = "https://en.wikipedia.org";

/// Every article link on a rendered page starts with this path.
pub const ARTICLE_PATH_PREFIX: &str = "/wiki/";

/// Linked from nearly every citation; never a real cross-reference.
pub const ISBN_LINK: &str = "/wiki/ISBN_(identifier)";

/// The "Categories:" label in the category box links to `Help:Category`.
pub const CATEGORY_LABEL_SUFFIX: &str = ":Category";

/// Markers of Wikipedia's non-article namespaces (talk pages, project pages,
/// media, templates, ...). An href containing any of these is not an article.
pub const NON_ARTICLE_NAMESPACES: &[&str] = &[
    "Talk:",
    "User:",
    "User_talk:",
    "Wikipedia:",
    "Wikipedia_talk:",
    "Project:",
    "Project_talk:",
    "File:",
    "File_talk:",
    "Image:",
    "Image_talk:",
    "MediaWiki:",
    "MediaWiki_talk:",
    "Template:",
    "Template_talk:",
    "Help:",
    "Help_talk:",
    "Category:",
    "Category_talk:",
    "Portal:",
    "Portal_talk:",
    "Draft:",
    "Draft_talk:",
    "TimedText:",
    "TimedText_talk:",
    "Module:",
    "Module_talk:",
    "Special:",
    "Media:",
];

/// True when `href` points into one of the [`NON_ARTICLE_NAMESPACES`].
pub fn is_non_article_link(href: &str) -> bool {
    NON_ARTICLE_NAMESPACES.iter().any(|ns| href.contains(ns))
}

/// True when `href` is a relative link to another article that should be
/// reported as a reference.
///
/// ```
/// use wikiscrape_web::namespaces::is_reference_candidate;
///
/// assert!(is_reference_candidate("/wiki/Stretford"));
/// assert!(!is_reference_candidate("/wiki/Talk:Stretford"));
/// assert!(!is_reference_candidate("/wiki/ISBN_(identifier)"));
/// assert!(!is_reference_candidate("https://example.org/wiki/Stretford"));
/// ```
pub fn is_reference_candidate(href: &str) -> bool {
    href.starts_with(ARTICLE_PATH_PREFIX) && href != ISBN_LINK && !is_non_article_link(href)
}

/// True for the category box's own "Categories:" label link.
pub fn is_category_label_link(href: &str) -> bool {
    href.ends_with(CATEGORY_LABEL_SUFFIX)
}

/// `/wiki/Foo` -> `https://en.wikipedia.org/wiki/Foo`.
pub fn absolute_wiki_url(href: &str) -> String {
    format!("{WIKI_ORIGIN}{href}")
}
