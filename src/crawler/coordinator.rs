//! Crawler coordinator - main crawl orchestration logic
//!
//! This module contains the breadth-first crawl loop:
//! - Seeding the first level
//! - Fetching and extracting text for every frontier URL, one at a time
//! - Handing text to the page store and following links of accepted pages
//! - Building each next level from the links not yet visited
//! - Stopping at the page quota or when no level remains

use crate::config::Config;
use crate::crawler::extractor::extract_text;
use crate::crawler::fetcher::{build_http_client, fetch_url};
use crate::crawler::frontier::{CrawlPhase, CrawlState, UrlSet};
use crate::crawler::links::get_links;
use crate::output::{CrawlReport, StopReason};
use crate::store::{FileStore, PageRecord, PageStore, PersistOutcome};
use crate::url::canonical_seed;
use crate::CrawlError;
use reqwest::Client;

/// Outcome of processing one URL
#[derive(Debug)]
pub enum PageOutcome {
    /// The page passed the threshold and was persisted
    Accepted(PageRecord),
    /// The page was fetched but not kept
    Rejected(Rejection),
    /// The page could not be fetched or written
    Failed(CrawlError),
}

/// Why a fetched page was not kept
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// No visible text remained after extraction
    EmptyText,
    /// Fewer words than the acceptance threshold
    TooFewWords { words: usize, required: usize },
}

/// Main crawler coordinator structure
pub struct Coordinator<S: PageStore = FileStore> {
    config: Config,
    store: S,
    client: Client,
    state: CrawlState,
}

impl Coordinator<FileStore> {
    /// Creates a coordinator writing to the configured output paths
    ///
    /// The pages directory is created and the index manifest truncated here,
    /// before any request is made.
    ///
    /// # Arguments
    ///
    /// * `seeds` - Seed URLs, in visiting order
    /// * `config` - The crawler configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Ready to run
    /// * `Err(CrawlError)` - The output could not be initialized or the
    ///   HTTP client could not be built
    pub fn new(seeds: Vec<String>, config: Config) -> Result<Self, CrawlError> {
        let store = FileStore::create(
            &config.output.pages_dir,
            &config.output.index_path,
            config.crawler.min_words,
        )?;
        Self::with_store(seeds, config, store)
    }
}

impl<S: PageStore> Coordinator<S> {
    /// Creates a coordinator around an existing page store
    pub fn with_store(seeds: Vec<String>, config: Config, store: S) -> Result<Self, CrawlError> {
        let mut frontier = UrlSet::new();
        for raw in &seeds {
            match canonical_seed(raw) {
                Some(seed) => {
                    frontier.insert(seed);
                }
                None => tracing::warn!("Ignoring invalid seed URL: {}", raw),
            }
        }

        let client = build_http_client(&config.http)?;

        Ok(Self {
            config,
            store,
            client,
            state: CrawlState::new(frontier),
        })
    }

    pub fn state(&self) -> &CrawlState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn quota_reached(&self) -> bool {
        self.state.quota_reached(self.config.crawler.min_pages)
    }

    /// Runs the crawl to completion
    ///
    /// Each level is worked through in order; after every attempted URL the
    /// configured delay is applied. Per-URL failures are logged and never
    /// abort the run.
    pub async fn run(&mut self) -> Result<CrawlReport, CrawlError> {
        let mut report = CrawlReport::start();
        let min_pages = self.config.crawler.min_pages;
        let delay = self.config.crawler.request_delay();

        tracing::info!(
            "Starting crawl: {} seed URLs, quota {} pages, at least {} words per page",
            self.state.frontier().len(),
            min_pages,
            self.store.min_words()
        );

        while !self.quota_reached() && !self.state.frontier().is_empty() {
            let level_urls = self.state.begin_level();
            tracing::info!(
                "Level {}: {} URLs to visit",
                self.state.level(),
                level_urls.len()
            );

            for url in level_urls {
                if self.quota_reached() {
                    break;
                }

                let Some(outcome) = self.process_url(&url).await else {
                    continue;
                };

                if matches!(outcome, PageOutcome::Accepted(_)) && !self.quota_reached() {
                    let links = get_links(&self.client, &url).await;
                    tracing::debug!("{} links found on {}", links.len(), url);
                    self.state.add_candidates(links);
                }

                report.record(&outcome);

                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
            }

            report.levels_completed += 1;

            if self.quota_reached() {
                break;
            }

            if !self.state.advance_level() {
                tracing::info!("No unvisited links left after level {}", self.state.level() - 1);
            }
        }

        self.state.finish();

        let reason = if self.quota_reached() {
            StopReason::QuotaReached
        } else {
            StopReason::FrontierExhausted
        };
        report.finish(self.state.downloaded(), reason);

        tracing::info!(
            "Crawl finished: {} pages downloaded ({:?})",
            report.pages_downloaded,
            reason
        );

        Ok(report)
    }

    /// Processes a single URL
    ///
    /// This method:
    /// 1. Marks the URL visited (returns None if it already was)
    /// 2. Fetches the page
    /// 3. Extracts its visible text
    /// 4. Hands the text to the page store
    pub async fn process_url(&mut self, url: &str) -> Option<PageOutcome> {
        if !self.state.mark_visited(url) {
            tracing::debug!("Skipping already visited {}", url);
            return None;
        }

        let outcome = match fetch_url(&self.client, url).await.into_body(url) {
            Ok(body) => self.accept_text(url, &extract_text(&body)),
            Err(e) => PageOutcome::Failed(e),
        };

        log_outcome(url, &outcome);
        Some(outcome)
    }

    fn accept_text(&mut self, url: &str, text: &str) -> PageOutcome {
        if text.is_empty() {
            return PageOutcome::Rejected(Rejection::EmptyText);
        }

        match self.store.persist(self.state.next_page_id(), url, text) {
            Ok(PersistOutcome::Saved(record)) => {
                let id = self.state.record_download();
                debug_assert_eq!(id, record.id);
                PageOutcome::Accepted(record)
            }
            Ok(PersistOutcome::BelowThreshold { words, required }) => {
                PageOutcome::Rejected(Rejection::TooFewWords { words, required })
            }
            Err(e) => PageOutcome::Failed(e.into()),
        }
    }

    pub fn phase(&self) -> CrawlPhase {
        self.state.phase()
    }
}

fn log_outcome(url: &str, outcome: &PageOutcome) {
    match outcome {
        PageOutcome::Accepted(record) => {
            tracing::info!("Saved page {}: {} ({} words)", record.id, url, record.words)
        }
        PageOutcome::Rejected(Rejection::EmptyText) => {
            tracing::info!("Page {} has no visible text, skipping", url)
        }
        PageOutcome::Rejected(Rejection::TooFewWords { words, required }) => tracing::info!(
            "Page {} has {} words, fewer than {}, skipping",
            url,
            words,
            required
        ),
        PageOutcome::Failed(CrawlError::Store(e)) => {
            tracing::error!("Failed to save {}: {}", url, e)
        }
        PageOutcome::Failed(e) => tracing::warn!("Failed to download {}: {}", url, e),
    }
}
