//! URL handling module for Pagecrawl
//!
//! This module decides which strings are usable crawl targets and turns
//! seed arguments into the canonical form the frontier compares against.

mod validator;

pub use validator::{is_crawlable, is_crawlable_url, BLOCKED_EXTENSIONS};

use url::Url;

/// Parses a seed argument into its canonical string form
///
/// Seeds go through the same serialization as discovered links, so
/// `http://example.com` and `http://example.com/` name the same page.
/// Fragments are dropped. Returns `None` for anything the validator rejects.
///
/// # Examples
///
/// ```
/// use pagecrawl::url::canonical_seed;
///
/// assert_eq!(
///     canonical_seed("http://example.com#top").as_deref(),
///     Some("http://example.com/")
/// );
/// assert_eq!(canonical_seed("ftp://example.com/"), None);
/// ```
pub fn canonical_seed(raw: &str) -> Option<String> {
    let mut url = Url::parse(raw.trim()).ok()?;
    url.set_fragment(None);
    is_crawlable_url(&url).then(|| url.to_string())
}
