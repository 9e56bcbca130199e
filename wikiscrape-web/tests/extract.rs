use wikiscrape_web::{extract_article, Article, ExtractError};

const FIXTURE: &str = include_str!("fixtures/nico_ditch.html");

fn wiki(path: &str) -> String {
    format!("https://en.wikipedia.org/wiki/{path}")
}

/// A page shaped like a MediaWiki render, with the parser output supplied
/// by the caller.
fn page(heading: Option<&str>, parser_output: &str, extra_body: &str) -> String {
    let heading = heading
        .map(|h| format!(r#"<h1 id="firstHeading">{h}</h1>"#))
        .unwrap_or_default();
    format!(
        r#"<!DOCTYPE html>
        <html>
        <head><title>Test Page</title></head>
        <body>
            {heading}
            <div id="mw-content-text">
                <div class="mw-parser-output">
                    {parser_output}
                </div>
            </div>
            {extra_body}
        </body>
        </html>"#
    )
}

const INFOBOX: &str = r#"
    <table class="infobox">
        <tr><td><img src="//test.com/image.jpg" alt="Test Image"/></td></tr>
    </table>"#;

fn basic_body() -> String {
    format!(
        r#"<p>First paragraph content.</p>
           <div class="mw-heading"><h2>Section Heading</h2></div>
           <p>Second paragraph content.</p>
           {INFOBOX}"#
    )
}

#[test]
fn well_formed_page_extracts_every_field() {
    let html = page(Some("Test Article Title"), &basic_body(), "");
    let article = extract_article(&html).unwrap();

    assert_eq!(article.title, "Test Article Title");
    assert_eq!(
        article.content,
        "First paragraph content.\nSection Heading\nSecond paragraph content."
    );
    assert_eq!(article.image_url, "https://test.com/image.jpg");
    assert!(article.categories.is_empty());
    assert!(article.references.is_empty());
}

#[test]
fn extraction_is_deterministic() {
    let first = extract_article(FIXTURE).unwrap();
    let second = extract_article(FIXTURE).unwrap();
    assert_eq!(first, second);
}

#[test]
fn missing_title_is_a_structure_error() {
    let html = page(None, &basic_body(), "");
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn missing_content_text_is_a_structure_error() {
    let html = format!(
        r#"<html><body><h1 id="firstHeading">Test Article Title</h1>{INFOBOX}</body></html>"#
    );
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn missing_infobox_is_a_structure_error() {
    let html = page(
        Some("Test Article Title"),
        r#"<p>First paragraph content.</p>"#,
        "",
    );
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn infobox_without_image_is_a_structure_error() {
    let html = page(
        Some("Test Article Title"),
        r#"<p>First paragraph content.</p>
           <table class="infobox"><tr><td>No picture</td></tr></table>"#,
        "",
    );
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn infobox_image_without_src_is_a_structure_error() {
    let html = page(
        Some("Test Article Title"),
        r#"<p>First paragraph content.</p>
           <table class="infobox"><tr><td><img alt="Lazy-loaded" data-src="//test.com/image.jpg"/></td></tr></table>"#,
        "",
    );
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn page_without_paragraphs_is_a_structure_error() {
    let html = page(
        Some("Test Article Title"),
        &format!(r#"<div class="mw-heading"><h2>Only a heading</h2></div>{INFOBOX}"#),
        "",
    );
    assert_eq!(extract_article(&html), Err(ExtractError::StructureNotFound));
}

#[test]
fn missing_catlinks_yields_empty_categories() {
    let html = page(Some("Test Article Title"), &basic_body(), "");
    let article = extract_article(&html).unwrap();
    assert_eq!(article.categories, Vec::<String>::new());
}

#[test]
fn content_stops_at_last_paragraph() {
    let body = format!(
        r#"<p>P1.</p>
           <p>P2.</p>
           <div class="mw-heading"><h2>See also</h2></div>
           <ul><li>Related list item</li></ul>
           <div class="mw-heading"><h2>References</h2></div>
           <div class="reflist"><p>Nested citation paragraph.</p></div>
           {INFOBOX}"#
    );
    let article = extract_article(&page(Some("T"), &body, "")).unwrap();
    assert_eq!(article.content, "P1.\nP2.");
    assert!(!article.content.contains("See also"));
    assert!(!article.content.contains("Nested citation"));
}

#[test]
fn headings_between_paragraphs_are_kept_and_other_blocks_dropped() {
    let body = format!(
        r#"<p>Lead.</p>
           <ul><li>Bullet not included</li></ul>
           <div class="mw-heading mw-heading3"><h3>Sub</h3><span class="mw-editsection">[<a>edit</a>]</span></div>
           <blockquote>Quote not included</blockquote>
           <p>Tail.</p>
           {INFOBOX}"#
    );
    let article = extract_article(&page(Some("T"), &body, "")).unwrap();
    assert_eq!(article.content, "Lead.\nSub\nTail.");
}

#[test]
fn cleaning_strips_wiki_artifacts_from_fragments() {
    let body = format!(
        "<p>Alpha[a] beta[1] gamma[citation needed] delta[note 3] epsilon[clarification needed]\u{a0}end.</p>\
         <div class=\"mw-heading\"><h2>Heading[edit]</h2></div>\
         <p>Last.</p>{INFOBOX}"
    );
    let article = extract_article(&page(Some("T"), &body, "")).unwrap();
    assert_eq!(
        article.content,
        "Alpha beta gamma delta epsilon end.\nHeading\nLast."
    );
    for marker in ["[a]", "[1]", "[edit]", "[citation needed]", "[note 3]", "[clarification needed]"] {
        assert!(!article.content.contains(marker), "{marker} leaked");
    }
    assert!(!article.content.contains('\u{a0}'));
}

#[test]
fn fragment_cleaning_to_whitespace_is_kept() {
    let body = format!("<p>Lead.</p><p>[1] [2]</p><p>Tail.</p>{INFOBOX}");
    let article = extract_article(&page(Some("T"), &body, "")).unwrap();
    assert_eq!(article.content, "Lead.\n \nTail.");
}

#[test]
fn reference_filtering_and_absolutisation() {
    let body = format!(
        r##"<p>
            <a href="/wiki/Some_Article">ok</a>
            <a href="/wiki/ISBN_(identifier)">ISBN</a>
            <a href="/wiki/Talk:X">talk</a>
            <a href="/wiki/File:Pic.jpg">file</a>
            <a href="https://example.org/wiki/Outside">external</a>
            <a href="#cite_note-1">[1]</a>
            <a>no href</a>
            <a href="/wiki/Some_Article">again</a>
        </p>{INFOBOX}"##
    );
    let article = extract_article(&page(Some("T"), &body, "")).unwrap();
    assert_eq!(
        article.references,
        vec![wiki("Some_Article"), wiki("Some_Article")]
    );
}

#[test]
fn categories_skip_label_and_keep_duplicates_in_order() {
    let catlinks = r#"
        <div id="catlinks"><div id="mw-normal-catlinks">
            <a href="/wiki/Help:Category">Categories</a>:
            <ul>
                <li><a href="/wiki/Category:B">B</a></li>
                <li><a href="/wiki/Category:A">A</a></li>
                <li><a href="/wiki/Category:B">B</a></li>
            </ul>
        </div></div>"#;
    let article = extract_article(&page(Some("T"), &basic_body(), catlinks)).unwrap();
    assert_eq!(article.categories, vec!["B", "A", "B"]);
}

#[test]
fn realistic_page_fixture() {
    let article = extract_article(FIXTURE).unwrap();

    let expected = Article {
        title: "Nico Ditch".to_string(),
        content: [
            "Nico Ditch is a six-mile (9.7 km) long linear earthwork between Ashton-under-Lyne and Stretford. Its name is probably derived from Old English.",
            "History",
            "The ditch was dug in the early medieval period, possibly as a defence against Danes.",
            "Sections survive at Platt Fields Park, listed as a Scheduled Ancient Monument.",
        ]
        .join("\n"),
        image_url: "https://upload.wikimedia.org/wikipedia/commons/thumb/7/79/NicoDitch.jpg/220px-NicoDitch.jpg"
            .to_string(),
        categories: vec![
            "Ancient dikes".to_string(),
            "History of Manchester".to_string(),
            "Linear earthworks".to_string(),
        ],
        references: [
            "Platt_Fields_Park",
            "Greater_Manchester",
            "Earthworks_(archaeology)",
            "Ashton-under-Lyne",
            "Stretford",
            "Old_English",
            "Early_medieval",
            "Danes_(Germanic_tribe)",
            "Platt_Fields_Park",
            "Scheduled_Ancient_Monument",
            "Scheduled_Monuments_in_Greater_Manchester",
            "Historic_England",
            "Manchester",
        ]
        .into_iter()
        .map(wiki)
        .collect(),
    };

    assert_eq!(article, expected);
}

#[test]
fn article_serialises_with_snake_case_keys() {
    let article = extract_article(&page(Some("T"), &basic_body(), "")).unwrap();
    let json = serde_json::to_value(&article).unwrap();
    assert_eq!(json["image_url"], "https://test.com/image.jpg");
    assert!(json["categories"].as_array().unwrap().is_empty());
}
