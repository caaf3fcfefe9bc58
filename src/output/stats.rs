//! Statistics of an existing crawl archive
//!
//! Reads the index manifest and page files a previous run left behind and
//! reports what is there, so an archive can be checked before it is fed to
//! later processing.

use crate::config::OutputConfig;
use crate::crawler::count_words;
use crate::store::{page_file_name, read_manifest};
use crate::CrawlError;
use std::collections::{BTreeMap, HashSet};
use url::Url;

/// Archive statistics summary
#[derive(Debug, Clone, Default)]
pub struct ArchiveStatistics {
    /// Number of manifest entries
    pub total_pages: u64,

    /// Words across all readable page files
    pub total_words: u64,

    /// Smallest page, in words
    pub min_words: Option<usize>,

    /// Largest page, in words
    pub max_words: Option<usize>,

    /// Ids listed in the manifest whose page file is missing
    pub missing_files: Vec<u64>,

    /// URLs listed more than once
    pub duplicate_urls: Vec<String>,

    /// Pages per host
    pub pages_by_host: BTreeMap<String, u64>,
}

impl ArchiveStatistics {
    pub fn average_words(&self) -> f64 {
        let present = self.total_pages - self.missing_files.len() as u64;
        if present == 0 {
            return 0.0;
        }
        self.total_words as f64 / present as f64
    }

    /// True when every entry has its file and no URL repeats
    pub fn is_consistent(&self) -> bool {
        self.missing_files.is_empty() && self.duplicate_urls.is_empty()
    }
}

/// Loads statistics for the archive at the configured output paths
///
/// # Returns
///
/// * `Ok(ArchiveStatistics)` - The archive was read
/// * `Err(CrawlError)` - The manifest is missing or malformed
pub fn load_statistics(output: &OutputConfig) -> Result<ArchiveStatistics, CrawlError> {
    let entries = read_manifest(&output.index_path)?;
    let mut stats = ArchiveStatistics::default();
    let mut seen = HashSet::new();

    for entry in entries {
        stats.total_pages += 1;

        if !seen.insert(entry.url.clone()) {
            stats.duplicate_urls.push(entry.url.clone());
        }

        let host = Url::parse(&entry.url)
            .ok()
            .and_then(|url| url.host_str().map(str::to_lowercase))
            .unwrap_or_else(|| "<invalid>".to_string());
        *stats.pages_by_host.entry(host).or_insert(0) += 1;

        let page_path = output.pages_dir.join(page_file_name(entry.id));
        match std::fs::read_to_string(&page_path) {
            Ok(text) => {
                let words = count_words(&text);
                stats.total_words += words as u64;
                stats.min_words = Some(stats.min_words.map_or(words, |m| m.min(words)));
                stats.max_words = Some(stats.max_words.map_or(words, |m| m.max(words)));
            }
            Err(e) => {
                tracing::debug!("Cannot read {}: {}", page_path.display(), e);
                stats.missing_files.push(entry.id);
            }
        }
    }

    Ok(stats)
}

/// Prints statistics to stdout in a formatted manner
pub fn print_statistics(stats: &ArchiveStatistics) {
    println!("=== Archive Statistics ===\n");

    println!("Overview:");
    println!("  Pages in manifest: {}", stats.total_pages);
    println!("  Total words: {}", stats.total_words);
    if let (Some(min), Some(max)) = (stats.min_words, stats.max_words) {
        println!("  Words per page: min {}, max {}, avg {:.0}", min, max, stats.average_words());
    }
    println!();

    if !stats.pages_by_host.is_empty() {
        println!("Pages by Host:");
        let mut hosts: Vec<_> = stats.pages_by_host.iter().collect();
        hosts.sort_by(|a, b| b.1.cmp(a.1));
        for (host, count) in hosts {
            println!("  {}: {}", host, count);
        }
        println!();
    }

    if !stats.missing_files.is_empty() {
        println!("Missing page files ({}):", stats.missing_files.len());
        for id in &stats.missing_files {
            println!("  - {}", page_file_name(*id));
        }
        println!();
    }

    if !stats.duplicate_urls.is_empty() {
        println!("Duplicate URLs ({}):", stats.duplicate_urls.len());
        for url in &stats.duplicate_urls {
            println!("  - {}", url);
        }
        println!();
    }

    if stats.is_consistent() {
        println!("Archive is consistent");
    } else {
        println!("Archive has problems");
    }
}
