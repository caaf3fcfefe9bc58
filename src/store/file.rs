//! Flat-file page store
//!
//! Layout, relative to the configured paths:
//!
//! ```text
//! downloaded_pages/page_1.txt
//! downloaded_pages/page_2.txt
//! index.txt            1\thttps://...\n2\thttps://...\n
//! ```

use crate::crawler::count_words;
use crate::store::{PageRecord, PageStore, PersistOutcome};
use crate::{StoreError, StoreResult};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// File name of the page with the given id
pub fn page_file_name(id: u64) -> String {
    format!("page_{}.txt", id)
}

/// Page store writing one text file per page plus an append-only manifest
#[derive(Debug)]
pub struct FileStore {
    pages_dir: PathBuf,
    index_path: PathBuf,
    min_words: usize,
}

impl FileStore {
    /// Prepares the archive for a new run
    ///
    /// Creates the pages directory if needed and truncates the manifest to
    /// empty. Page files left by an earlier run are overwritten as ids are
    /// reassigned from 1.
    ///
    /// # Returns
    ///
    /// * `Ok(FileStore)` - Archive ready for writing
    /// * `Err(StoreError)` - Directory or manifest could not be created
    pub fn create(
        pages_dir: impl Into<PathBuf>,
        index_path: impl Into<PathBuf>,
        min_words: usize,
    ) -> StoreResult<Self> {
        let pages_dir = pages_dir.into();
        let index_path = index_path.into();

        fs::create_dir_all(&pages_dir).map_err(|source| StoreError::Io {
            path: pages_dir.clone(),
            source,
        })?;

        if let Some(parent) = index_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        File::create(&index_path).map_err(|source| StoreError::Io {
            path: index_path.clone(),
            source,
        })?;

        tracing::debug!(
            "Page store ready: pages in {}, manifest at {}",
            pages_dir.display(),
            index_path.display()
        );

        Ok(Self {
            pages_dir,
            index_path,
            min_words,
        })
    }

    pub fn pages_dir(&self) -> &Path {
        &self.pages_dir
    }

    pub fn index_path(&self) -> &Path {
        &self.index_path
    }

    /// Path of the page file with the given id
    pub fn page_path(&self, id: u64) -> PathBuf {
        self.pages_dir.join(page_file_name(id))
    }

    fn append_manifest_line(&self, record: &PageRecord) -> io::Result<()> {
        let mut index = OpenOptions::new().append(true).open(&self.index_path)?;
        append_line(&mut index, &format!("{}\n", record.manifest_line()))
    }
}

/// Append target of the index manifest
trait ManifestLog: Write {
    fn current_len(&self) -> io::Result<u64>;
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl ManifestLog for File {
    fn current_len(&self) -> io::Result<u64> {
        Ok(self.metadata()?.len())
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }
}

/// Writes one complete line, or leaves the log as it was
///
/// A failed write is cut back to the previous length so no partial line
/// stays behind.
fn append_line<L: ManifestLog>(log: &mut L, line: &str) -> io::Result<()> {
    let previous_len = log.current_len()?;
    let result = log.write_all(line.as_bytes()).and_then(|()| log.flush());

    if result.is_err() {
        if let Err(e) = log.truncate(previous_len) {
            tracing::error!("Failed to roll back manifest to {} bytes: {}", previous_len, e);
        }
    }

    result
}

impl PageStore for FileStore {
    fn min_words(&self) -> usize {
        self.min_words
    }

    fn persist(&mut self, id: u64, url: &str, text: &str) -> StoreResult<PersistOutcome> {
        let words = count_words(text);
        tracing::debug!("{}: {} words", url, words);

        if words < self.min_words {
            return Ok(PersistOutcome::BelowThreshold {
                words,
                required: self.min_words,
            });
        }

        let record = PageRecord {
            id,
            url: url.to_string(),
            text: text.to_string(),
            words,
        };

        let page_path = self.page_path(id);
        fs::write(&page_path, record.text.as_bytes()).map_err(|source| StoreError::Io {
            path: page_path.clone(),
            source,
        })?;

        if let Err(source) = self.append_manifest_line(&record) {
            // Keep page files and manifest lines one-to-one
            if let Err(e) = fs::remove_file(&page_path) {
                tracing::warn!("Failed to remove orphaned {}: {}", page_path.display(), e);
            }
            return Err(StoreError::Io {
                path: self.index_path.clone(),
                source,
            });
        }

        Ok(PersistOutcome::Saved(record))
    }
}
