//! Removal of MediaWiki rendering artifacts from paragraph and heading text.

use regex::Regex;
use std::sync::LazyLock;

/// Footnote markers, edit links and maintenance tags, applied in order.
const ARTIFACT_PATTERNS: &[&str] = &[
    // [a], [b], ... explanatory notes
    r"\[[a-z]+\]",
    r"\[edit\]",
    // [1], [2], ... citations
    r"\[\d+\]",
    r"\[citation needed\]",
    r"\[note \d+\]",
    r"\[clarification needed\]",
];

const NBSP: char = '\u{a0}';

static ARTIFACTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    ARTIFACT_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("artifact pattern is a valid regex"))
        .collect()
});

/// Strip wiki artifacts from `text` and normalise non-breaking spaces.
///
/// ```
/// use wikiscrape_web::clean::clean_text;
///
/// assert_eq!(
///     clean_text("Nico Ditch[1] is a\u{a0}linear earthwork.[citation needed]"),
///     "Nico Ditch is a linear earthwork."
/// );
/// ```
pub fn clean_text(text: &str) -> String {
    let mut out = text.to_string();
    for re in ARTIFACTS.iter() {
        if re.is_match(&out) {
            out = re.replace_all(&out, "").into_owned();
        }
    }
    out.replace(NBSP, " ")
}
