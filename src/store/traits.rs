//! Page store trait and outcome types

use crate::store::PageRecord;
use crate::StoreResult;

/// Result of handing a page to the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistOutcome {
    /// The page met the threshold and was written
    Saved(PageRecord),

    /// The page had too few words; nothing was written
    BelowThreshold { words: usize, required: usize },
}

/// Trait for page store backends
///
/// The store applies the acceptance policy and persists accepted pages.
/// It does not own the page counter: the caller supplies the id the page
/// will receive if accepted, and advances its own counter on `Saved`.
pub trait PageStore {
    /// Minimum word count a page must reach to be saved
    fn min_words(&self) -> usize;

    /// Applies the word-count policy and persists the page if it passes
    ///
    /// # Arguments
    ///
    /// * `id` - Id the page receives if accepted
    /// * `url` - Source URL
    /// * `text` - Extracted visible text
    ///
    /// # Returns
    ///
    /// * `Ok(PersistOutcome::Saved)` - Page file and manifest line written
    /// * `Ok(PersistOutcome::BelowThreshold)` - Rejected, no side effects
    /// * `Err(StoreError)` - Writing failed; the manifest is left untouched
    fn persist(&mut self, id: u64, url: &str, text: &str) -> StoreResult<PersistOutcome>;
}
