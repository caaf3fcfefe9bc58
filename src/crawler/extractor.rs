//! Visible text extraction
//!
//! Turns raw page markup into a single line of normalized text: non-content
//! subtrees are removed from the DOM, the remaining text nodes are joined in
//! document order, and whitespace runs collapse to one space.

use scraper::{Html, Selector};

/// Elements whose whole subtree never counts as page text
pub const NON_CONTENT_ELEMENTS: &str = "script, style, nav, footer, head, iframe";

/// Extracts normalized visible text from HTML
///
/// Returns an empty string when nothing visible remains.
///
/// # Example
///
/// ```
/// use pagecrawl::crawler::extract_text;
///
/// let html = "<html><head><title>T</title></head>\
///             <body><nav>Menu</nav><p>Hello,\n\t world</p></body></html>";
/// assert_eq!(extract_text(html), "Hello, world");
/// ```
pub fn extract_text(html: &str) -> String {
    let mut document = Html::parse_document(html);
    remove_non_content(&mut document);

    let raw: String = document
        .tree
        .root()
        .descendants()
        .filter_map(|node| node.value().as_text())
        .map(|text| &**text)
        .collect();

    collapse_whitespace(&raw)
}

/// Detaches every non-content subtree from the document
fn remove_non_content(document: &mut Html) {
    let Ok(selector) = Selector::parse(NON_CONTENT_ELEMENTS) else {
        return;
    };

    let ids: Vec<_> = document.select(&selector).map(|element| element.id()).collect();
    for id in ids {
        if let Some(mut node) = document.tree.get_mut(id) {
            node.detach();
        }
    }
}

/// Collapses whitespace runs (including newlines and tabs) into single spaces
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Counts words separated by spaces, tabs or newlines
pub fn count_words(text: &str) -> usize {
    text.split([' ', '\t', '\n'])
        .filter(|word| !word.is_empty())
        .count()
}
