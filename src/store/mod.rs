//! Page store for persisting accepted pages
//!
//! This module owns the on-disk crawl archive:
//! - One UTF-8 text file per accepted page, named after its sequential id
//! - A tab-separated index manifest with one `<id>\t<url>` line per page
//! - The word-count acceptance policy that guards both

mod file;
mod traits;

pub use file::{page_file_name, FileStore};
pub use traits::{PageStore, PersistOutcome};

use crate::{StoreError, StoreResult};
use std::path::Path;

/// An accepted page
///
/// Created only when a page passes the word-count threshold and never
/// modified afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRecord {
    /// Sequential id, 1-based, in acceptance order
    pub id: u64,
    /// Source URL the text was fetched from
    pub url: String,
    /// Extracted visible text
    pub text: String,
    /// Word count of `text`
    pub words: usize,
}

impl PageRecord {
    /// The manifest line for this record, without the trailing newline
    pub fn manifest_line(&self) -> String {
        format!("{}\t{}", self.id, self.url)
    }
}

/// One parsed line of the index manifest
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestEntry {
    pub id: u64,
    pub url: String,
}

/// Reads an index manifest written by [`FileStore`]
///
/// # Arguments
///
/// * `path` - Path to the manifest file
///
/// # Returns
///
/// * `Ok(Vec<ManifestEntry>)` - Entries in file order
/// * `Err(StoreError)` - The file could not be read or a line is malformed
pub fn read_manifest(path: &Path) -> StoreResult<Vec<ManifestEntry>> {
    let content = std::fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    parse_manifest(&content)
}

/// Parses manifest text; blank lines are ignored
pub fn parse_manifest(content: &str) -> StoreResult<Vec<ManifestEntry>> {
    let mut entries = Vec::new();

    for (index, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }

        let malformed = || StoreError::MalformedManifest {
            line: index + 1,
            content: line.to_string(),
        };

        let (id, url) = line.split_once('\t').ok_or_else(malformed)?;
        let id = id.trim().parse::<u64>().map_err(|_| malformed())?;
        let url = url.trim();
        if url.is_empty() {
            return Err(malformed());
        }

        entries.push(ManifestEntry {
            id,
            url: url.to_string(),
        });
    }

    Ok(entries)
}
