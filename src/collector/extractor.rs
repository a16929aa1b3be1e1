//! Topic tag extraction from result page markup
//!
//! Each search result carries zero or more topic tags rendered as anchor
//! elements with a fixed class signature. This module pulls those tags out
//! of a fetched page body in document order.

use scraper::{Html, Selector};

/// Exact class attribute carried by topic tag anchors on a results page
const TOPIC_TAG_CLASS: &str = "topic-tag topic-tag-link f6 px-2 mx-0";

/// Extracts topic tag labels from one page body
///
/// Matches `<a>` elements whose class attribute is exactly the topic tag
/// signature and returns their trimmed text content in document order.
///
/// A page with no matching elements yields an empty list; that is a normal
/// outcome, not an error. A matching element whose text trims to nothing is
/// skipped: an empty string is markup noise, not a usable label. The parser
/// is lenient, so malformed markup degrades to however much of the document
/// still parses (in the worst case, zero labels). The same policy applies
/// in both collection modes.
///
/// # Example
///
/// ```
/// use topic_tally::collector::extract_labels;
///
/// let html = r#"<a class="topic-tag topic-tag-link f6 px-2 mx-0"> rust </a>"#;
/// assert_eq!(extract_labels(html), vec!["rust".to_string()]);
/// ```
pub fn extract_labels(body: &str) -> Vec<String> {
    let document = Html::parse_document(body);

    // The class string is a compile-time constant, so the selector always parses
    let selector = match Selector::parse(&format!("a[class=\"{}\"]", TOPIC_TAG_CLASS)) {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    document
        .select(&selector)
        .map(|element| element.text().collect::<String>().trim().to_string())
        .filter(|label| !label.is_empty())
        .collect()
}
