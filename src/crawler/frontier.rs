//! Crawl frontier and crawl state
//!
//! This module holds everything the coordinator mutates while crawling:
//! - [`UrlSet`], an insertion-ordered set of URLs used for levels and links
//! - [`CrawlState`], the visited set, page counter and current/next levels
//! - [`CrawlPhase`], the `Idle → LevelActive → Done` state machine
//!
//! Within a level URLs are visited first-discovered-first. Seeds keep the
//! order they were given in; later levels keep the order in which links
//! were found, page by page.

use std::collections::HashSet;

/// Insertion-ordered, deduplicated set of URL strings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlSet {
    order: Vec<String>,
    members: HashSet<String>,
}

impl UrlSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a URL, returning false if it was already present
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.members.contains(&url) {
            return false;
        }
        self.members.insert(url.clone());
        self.order.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.members.contains(url)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterates in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.order.iter()
    }

    /// URLs of this set not contained in `exclude`, order preserved
    pub fn difference(&self, exclude: &HashSet<String>) -> UrlSet {
        self.order
            .iter()
            .filter(|url| !exclude.contains(*url))
            .cloned()
            .collect()
    }

    pub fn clear(&mut self) {
        self.order.clear();
        self.members.clear();
    }
}

impl Extend<String> for UrlSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        for url in iter {
            self.insert(url);
        }
    }
}

impl FromIterator<String> for UrlSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        let mut set = UrlSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for UrlSet {
    type Item = String;
    type IntoIter = std::vec::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.into_iter()
    }
}

impl<'a> IntoIterator for &'a UrlSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.order.iter()
    }
}

/// Where the crawl is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrawlPhase {
    /// Constructed, nothing fetched yet
    Idle,
    /// Working through the given level (0 = seeds)
    LevelActive { level: u32 },
    /// Quota reached or frontier exhausted
    Done,
}

/// Mutable state of one crawl run
///
/// Owned by the coordinator; other components only ever see shared
/// references.
#[derive(Debug, Clone)]
pub struct CrawlState {
    visited: HashSet<String>,
    downloaded: u64,
    frontier: UrlSet,
    candidates: UrlSet,
    level: u32,
    phase: CrawlPhase,
}

impl CrawlState {
    /// Creates the initial state with the seed set as level 0
    pub fn new(seeds: UrlSet) -> Self {
        Self {
            visited: HashSet::new(),
            downloaded: 0,
            frontier: seeds,
            candidates: UrlSet::new(),
            level: 0,
            phase: CrawlPhase::Idle,
        }
    }

    pub fn visited(&self) -> &HashSet<String> {
        &self.visited
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Number of pages accepted so far
    pub fn downloaded(&self) -> u64 {
        self.downloaded
    }

    pub fn frontier(&self) -> &UrlSet {
        &self.frontier
    }

    /// Links collected for the next level so far
    pub fn candidates(&self) -> &UrlSet {
        &self.candidates
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn phase(&self) -> CrawlPhase {
        self.phase
    }

    pub fn quota_reached(&self, min_pages: u64) -> bool {
        self.downloaded >= min_pages
    }

    /// Marks a URL as attempted, returning false if it already was
    pub fn mark_visited(&mut self, url: &str) -> bool {
        self.visited.insert(url.to_string())
    }

    /// Id the next accepted page will receive
    pub fn next_page_id(&self) -> u64 {
        self.downloaded + 1
    }

    /// Counts an accepted page and returns its id
    pub fn record_download(&mut self) -> u64 {
        self.downloaded += 1;
        self.downloaded
    }

    /// Adds discovered links to the next-level candidates
    pub fn add_candidates(&mut self, links: UrlSet) {
        self.candidates.extend(links);
    }

    /// Enters the current level and returns its URLs in visiting order
    pub fn begin_level(&mut self) -> Vec<String> {
        self.phase = CrawlPhase::LevelActive { level: self.level };
        self.frontier.iter().cloned().collect()
    }

    /// Replaces the frontier with the unvisited candidates
    ///
    /// Returns true if the new frontier has anything to visit.
    pub fn advance_level(&mut self) -> bool {
        self.frontier = self.candidates.difference(&self.visited);
        self.candidates.clear();
        self.level += 1;
        !self.frontier.is_empty()
    }

    pub fn finish(&mut self) {
        self.phase = CrawlPhase::Done;
    }
}
