//! Output module for crawl reports and archive statistics
//!
//! This module handles:
//! - Tallying the outcome of every attempted URL during a run
//! - Printing the end-of-run summary
//! - Inspecting an archive left by a previous run

pub mod stats;

pub use stats::{load_statistics, print_statistics, ArchiveStatistics};

use crate::crawler::{PageOutcome, Rejection};
use chrono::{DateTime, Utc};

/// Why a crawl stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StopReason {
    /// The page quota was met
    QuotaReached,
    /// A level produced no unvisited links
    FrontierExhausted,
}

/// Summary of one crawl run
#[derive(Debug, Clone)]
pub struct CrawlReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,

    /// Pages accepted and persisted
    pub pages_downloaded: u64,
    /// URLs for which a fetch was attempted
    pub urls_attempted: u64,
    /// Pages with no visible text
    pub rejected_empty: u64,
    /// Pages below the word threshold
    pub rejected_too_few_words: u64,
    /// Fetch or write failures
    pub failed: u64,
    /// Levels worked through, including a level cut short by the quota
    pub levels_completed: u32,

    pub stop_reason: StopReason,
}

impl CrawlReport {
    /// Creates an empty report stamped with the current time
    pub fn start() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            pages_downloaded: 0,
            urls_attempted: 0,
            rejected_empty: 0,
            rejected_too_few_words: 0,
            failed: 0,
            levels_completed: 0,
            stop_reason: StopReason::FrontierExhausted,
        }
    }

    /// Tallies the outcome of one attempted URL
    pub fn record(&mut self, outcome: &PageOutcome) {
        self.urls_attempted += 1;
        match outcome {
            PageOutcome::Accepted(_) => {}
            PageOutcome::Rejected(Rejection::EmptyText) => self.rejected_empty += 1,
            PageOutcome::Rejected(Rejection::TooFewWords { .. }) => {
                self.rejected_too_few_words += 1
            }
            PageOutcome::Failed(_) => self.failed += 1,
        }
    }

    /// Stamps the finish time and final counts
    pub fn finish(&mut self, pages_downloaded: u64, stop_reason: StopReason) {
        self.finished_at = Some(Utc::now());
        self.pages_downloaded = pages_downloaded;
        self.stop_reason = stop_reason;
    }

    pub fn rejected(&self) -> u64 {
        self.rejected_empty + self.rejected_too_few_words
    }

    /// Wall-clock duration, once finished
    pub fn duration_seconds(&self) -> Option<i64> {
        self.finished_at
            .map(|finished| (finished - self.started_at).num_seconds())
    }

    /// Share of attempted URLs that were kept, as a percentage
    pub fn acceptance_rate(&self) -> f64 {
        if self.urls_attempted == 0 {
            return 0.0;
        }
        (self.pages_downloaded as f64 / self.urls_attempted as f64) * 100.0
    }
}

/// Prints the run summary to stdout
pub fn print_report(report: &CrawlReport) {
    println!("=== Crawl Summary ===\n");
    println!("  Started: {}", report.started_at.to_rfc3339());
    if let Some(finished) = report.finished_at {
        println!("  Finished: {}", finished.to_rfc3339());
    }
    if let Some(duration) = report.duration_seconds() {
        println!("  Duration: {} seconds", duration);
    }
    println!("  Stop reason: {:?}", report.stop_reason);
    println!("  Levels: {}", report.levels_completed);
    println!();
    println!("  URLs attempted: {}", report.urls_attempted);
    println!("  Pages downloaded: {}", report.pages_downloaded);
    println!(
        "  Rejected: {} ({} empty, {} too short)",
        report.rejected(),
        report.rejected_empty,
        report.rejected_too_few_words
    );
    println!("  Failed: {}", report.failed);
    println!("  Acceptance rate: {:.1}%", report.acceptance_rate());
}
