//! HTTP fetcher implementation
//!
//! This module handles all HTTP requests for the crawler:
//! - Building the single shared client (user agent, timeout, decompression)
//! - GET requests for page content
//! - Error classification into [`FetchResult`]

use crate::config::HttpConfig;
use crate::CrawlError;
use reqwest::Client;

/// Result of a fetch operation
#[derive(Debug)]
pub enum FetchResult {
    /// Successfully fetched the page
    Success {
        /// Final URL after redirects
        final_url: String,
        /// Page body content
        body: String,
    },

    /// Server answered with a non-success status
    HttpError {
        /// The HTTP status code
        status_code: u16,
    },

    /// Network error (connection refused, timeout, unreadable body, etc.)
    NetworkError {
        /// Error description
        error: String,
    },
}

impl FetchResult {
    /// Returns the body of a successful fetch, or the failure as an error
    pub fn into_body(self, url: &str) -> Result<String, CrawlError> {
        match self {
            FetchResult::Success { final_url, body } => {
                if final_url != url {
                    tracing::debug!("{} redirected to {}", url, final_url);
                }
                Ok(body)
            }
            FetchResult::HttpError { status_code } => Err(CrawlError::HttpStatus {
                url: url.to_string(),
                status: status_code,
            }),
            FetchResult::NetworkError { error } => Err(CrawlError::Network {
                url: url.to_string(),
                message: error,
            }),
        }
    }
}

/// Builds the HTTP client shared by every request of a crawl run
///
/// Redirects follow reqwest's default policy. Responses compressed with
/// gzip, deflate or brotli are decoded transparently.
///
/// # Example
///
/// ```no_run
/// use pagecrawl::config::HttpConfig;
/// use pagecrawl::crawler::build_http_client;
///
/// let client = build_http_client(&HttpConfig::default()).unwrap();
/// ```
pub fn build_http_client(config: &HttpConfig) -> Result<Client, reqwest::Error> {
    Client::builder()
        .user_agent(config.user_agent.as_str())
        .timeout(config.timeout())
        .gzip(true)
        .deflate(true)
        .brotli(true)
        .build()
}

/// Fetches a URL with a single GET request
///
/// | Condition             | Result         |
/// |-----------------------|----------------|
/// | 2xx, readable body    | `Success`      |
/// | any other status      | `HttpError`    |
/// | timeout               | `NetworkError` |
/// | connection failure    | `NetworkError` |
/// | body decoding failure | `NetworkError` |
///
/// There are no retries; the caller decides what a failure means.
pub async fn fetch_url(client: &Client, url: &str) -> FetchResult {
    let response = match client.get(url).send().await {
        Ok(response) => response,
        Err(e) => {
            let error = if e.is_timeout() {
                "Request timeout".to_string()
            } else if e.is_connect() {
                format!("Connection failed: {}", e)
            } else {
                e.to_string()
            };
            return FetchResult::NetworkError { error };
        }
    };

    let status = response.status();
    if !status.is_success() {
        return FetchResult::HttpError {
            status_code: status.as_u16(),
        };
    }

    let final_url = response.url().to_string();
    match response.text().await {
        Ok(body) => FetchResult::Success { final_url, body },
        Err(e) => FetchResult::NetworkError {
            error: format!("Failed to read body: {}", e),
        },
    }
}
