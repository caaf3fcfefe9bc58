//! Outbound link discovery
//!
//! This module finds the crawlable links of a page:
//! - `<a href="...">` anchors only
//! - Fragments (`#...`) stripped before resolution
//! - Relative hrefs resolved against the page URL
//! - Links back to the page itself dropped
//! - Everything else filtered through the URL validator

use crate::crawler::fetcher::fetch_url;
use crate::crawler::frontier::UrlSet;
use crate::url::is_crawlable_url;
use reqwest::Client;
use scraper::{Html, Selector};
use url::Url;

/// Fetches a page and returns its crawlable outbound links
///
/// Any failure (network error, non-success status, unreadable body) is
/// logged and yields an empty set.
///
/// # Arguments
///
/// * `client` - The shared HTTP client
/// * `url` - The page to fetch
pub async fn get_links(client: &Client, url: &str) -> UrlSet {
    match fetch_url(client, url).await.into_body(url) {
        Ok(body) => extract_links(&body, url),
        Err(e) => {
            tracing::warn!("Failed to get links from {}: {}", url, e);
            UrlSet::new()
        }
    }
}

/// Extracts crawlable absolute links from HTML
///
/// Links come back deduplicated, in the order they first appear in the
/// document.
///
/// # Example
///
/// ```
/// use pagecrawl::crawler::extract_links;
///
/// let html = r#"<a href="/about">About</a><a href="y#frag">Y</a>"#;
/// let links = extract_links(html, "http://a.example/dir/x");
/// let links: Vec<&str> = links.iter().map(String::as_str).collect();
/// assert_eq!(links, vec!["http://a.example/about", "http://a.example/dir/y"]);
/// ```
pub fn extract_links(html: &str, page_url: &str) -> UrlSet {
    let mut links = UrlSet::new();

    let Ok(base_url) = Url::parse(page_url) else {
        return links;
    };

    let document = Html::parse_document(html);
    if let Ok(a_selector) = Selector::parse("a[href]") {
        for element in document.select(&a_selector) {
            if let Some(href) = element.value().attr("href") {
                if let Some(absolute_url) = resolve_link(href, &base_url, page_url) {
                    links.insert(absolute_url);
                }
            }
        }
    }

    links
}

/// Resolves a link href to an absolute URL and validates it
///
/// Returns None if the link should be excluded:
/// - It points back at the page itself
/// - It cannot be resolved against the base URL
/// - The resolved URL fails the URL validator
fn resolve_link(href: &str, base_url: &Url, page_url: &str) -> Option<String> {
    let href = strip_fragment(href.trim());

    if href == page_url {
        return None;
    }

    let mut absolute_url = base_url.join(href).ok()?;
    absolute_url.set_fragment(None);

    if !is_crawlable_url(&absolute_url) {
        return None;
    }

    let absolute_url = absolute_url.to_string();
    (absolute_url != page_url).then_some(absolute_url)
}

/// Drops everything from the first `#` on
fn strip_fragment(href: &str) -> &str {
    href.split('#').next().unwrap_or(href)
}
