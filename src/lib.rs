//! Pagecrawl: a breadth-first text harvester
//!
//! This crate crawls the web level by level from a set of seed URLs, extracts
//! the visible text of every page, and keeps the pages that carry enough words
//! as flat text files indexed by a tab-separated manifest.

pub mod config;
pub mod crawler;
pub mod output;
pub mod store;
pub mod url;

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Pagecrawl operations
#[derive(Debug, Error)]
pub enum CrawlError {
    #[error("Page store error: {0}")]
    Store(#[from] StoreError),

    #[error("HTTP {status} for {url}")]
    HttpStatus { url: String, status: u16 },

    #[error("Network error for {url}: {message}")]
    Network { url: String, message: String },

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// Page store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed manifest line {line}: {content:?}")]
    MalformedManifest { line: usize, content: String },
}

/// Result type alias for page store operations
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{Coordinator, CrawlPhase, PageOutcome, Rejection};
pub use output::CrawlReport;
pub use store::{FileStore, PageRecord, PageStore};
pub use url::is_crawlable;
