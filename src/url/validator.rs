use url::Url;

/// Path suffixes that never lead to text content
pub const BLOCKED_EXTENSIONS: &[&str] = &[".pdf", ".jpg", ".png", ".gif", ".zip", ".doc", ".docx"];

/// Checks whether a string is usable as a crawl target
///
/// The candidate must parse as an absolute `http` or `https` URL whose path
/// does not end in one of [`BLOCKED_EXTENSIONS`] (compared case-insensitively).
/// This is purely syntactic: no request is made.
///
/// # Examples
///
/// ```
/// use pagecrawl::url::is_crawlable;
///
/// assert!(is_crawlable("http://a.example/file.html"));
/// assert!(!is_crawlable("http://a.example/file.pdf"));
/// assert!(!is_crawlable("/relative/path"));
/// ```
pub fn is_crawlable(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => is_crawlable_url(&url),
        Err(_) => false,
    }
}

/// Same check as [`is_crawlable`] for an already parsed URL
pub fn is_crawlable_url(url: &Url) -> bool {
    if url.scheme() != "http" && url.scheme() != "https" {
        return false;
    }

    if url.host_str().is_none() {
        return false;
    }

    let path = url.path().to_ascii_lowercase();
    !BLOCKED_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
}
