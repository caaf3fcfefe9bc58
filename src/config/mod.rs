//! Configuration module for Pagecrawl
//!
//! This module handles loading, parsing, and validating TOML configuration files.
//! Every key has a default, so a crawl can run without any file at all.
//!
//! # Example
//!
//! ```no_run
//! use pagecrawl::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("pagecrawl.toml")).unwrap();
//! println!("Crawler stops after {} pages", config.crawler.min_pages);
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, CrawlerConfig, HttpConfig, OutputConfig};

// Re-export parser functions
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
pub use validation::validate;
