//! Crawler module for web page fetching and processing
//!
//! This module contains the core crawling logic, including:
//! - HTTP fetching through one shared client
//! - Visible text extraction
//! - Link extraction and resolution
//! - The level-by-level frontier
//! - Overall crawl coordination

mod coordinator;
mod extractor;
mod fetcher;
mod frontier;
mod links;

pub use coordinator::{Coordinator, PageOutcome, Rejection};
pub use extractor::{collapse_whitespace, count_words, extract_text, NON_CONTENT_ELEMENTS};
pub use fetcher::{build_http_client, fetch_url, FetchResult};
pub use frontier::{CrawlPhase, CrawlState, UrlSet};
pub use links::{extract_links, get_links};

use crate::config::Config;
use crate::output::CrawlReport;
use crate::CrawlError;

/// Runs a complete crawl operation
///
/// This is the main entry point for starting a crawl. It will:
/// 1. Prepare the output directory and reset the index manifest
/// 2. Build the HTTP client
/// 3. Visit the seeds, then each following level of links
/// 4. Stop at the page quota or when no unvisited links remain
///
/// # Example
///
/// ```no_run
/// use pagecrawl::config::Config;
/// use pagecrawl::crawler::crawl;
///
/// # async fn example() -> Result<(), pagecrawl::CrawlError> {
/// let report = crawl(vec!["https://example.com/".to_string()], Config::default()).await?;
/// println!("{} pages", report.pages_downloaded);
/// # Ok(())
/// # }
/// ```
pub async fn crawl(seeds: Vec<String>, config: Config) -> Result<CrawlReport, CrawlError> {
    let mut coordinator = Coordinator::new(seeds, config)?;
    coordinator.run().await
}
