use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Default quota of accepted pages
pub const DEFAULT_MIN_PAGES: u64 = 100;

/// Default acceptance threshold in words
pub const DEFAULT_MIN_WORDS: usize = 1000;

/// Default pause after every attempted URL (milliseconds)
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 1000;

/// Default User-Agent header
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0";

/// Default request timeout (seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Default directory for page files
pub const DEFAULT_PAGES_DIR: &str = "downloaded_pages";

/// Default index manifest path
pub const DEFAULT_INDEX_PATH: &str = "index.txt";

/// Main configuration structure for Pagecrawl
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub crawler: CrawlerConfig,
    pub http: HttpConfig,
    pub output: OutputConfig,
}

/// Crawl policy configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CrawlerConfig {
    /// Number of accepted pages after which the crawl stops
    #[serde(rename = "min-pages")]
    pub min_pages: u64,

    /// Minimum word count for a page to be kept
    #[serde(rename = "min-words")]
    pub min_words: usize,

    /// Pause after every attempted URL (milliseconds)
    #[serde(rename = "request-delay-ms")]
    pub request_delay_ms: u64,
}

impl CrawlerConfig {
    pub fn request_delay(&self) -> Duration {
        Duration::from_millis(self.request_delay_ms)
    }
}

impl Default for CrawlerConfig {
    fn default() -> Self {
        Self {
            min_pages: DEFAULT_MIN_PAGES,
            min_words: DEFAULT_MIN_WORDS,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
        }
    }
}

/// Shared HTTP client configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// User-Agent header sent with every request
    #[serde(rename = "user-agent")]
    pub user_agent: String,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs")]
    pub timeout_secs: u64,
}

impl HttpConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving one text file per accepted page
    #[serde(rename = "pages-dir")]
    pub pages_dir: PathBuf,

    /// Tab-separated manifest of accepted pages
    #[serde(rename = "index-path")]
    pub index_path: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pages_dir: PathBuf::from(DEFAULT_PAGES_DIR),
            index_path: PathBuf::from(DEFAULT_INDEX_PATH),
        }
    }
}
