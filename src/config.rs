use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::fetch::{AccessRoute, default_routes};

/// Configuration for a sitemap crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CrawlConfig {
    /// URL to start crawling from; a bare host gets an https:// prefix
    pub start_url: String,

    /// Maximum link depth below the start page
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Maximum number of pages to visit
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Whether to collect image references for the sitemap
    #[serde(default)]
    pub include_images: bool,

    /// Per-request timeout in seconds
    #[serde(default = "default_fetch_timeout_secs")]
    pub fetch_timeout_secs: u64,

    /// Pause before each request, in milliseconds, indexed by the parent
    /// page's depth and clamped to the last entry; empty disables the pause
    #[serde(default = "default_politeness_delays_ms")]
    pub politeness_delays_ms: Vec<u64>,

    /// Access routes tried in order for every page
    #[serde(default = "default_routes")]
    pub routes: Vec<AccessRoute>,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// Regex patterns for URLs to include (if empty, all URLs are included)
    #[serde(default)]
    pub include_patterns: Vec<String>,

    /// Regex patterns for URLs to exclude (these take precedence)
    #[serde(default)]
    pub exclude_patterns: Vec<String>,
}

/// Default maximum link depth
fn default_max_depth() -> usize {
    2
}

/// Default page cap
fn default_max_pages() -> usize {
    100
}

/// Default per-request timeout in seconds
fn default_fetch_timeout_secs() -> u64 {
    30
}

/// Default politeness schedule: shallow pages wait less
fn default_politeness_delays_ms() -> Vec<u64> {
    vec![400, 600, 800]
}

/// Default user agent string
fn default_user_agent() -> String {
    format!("sitemapper/{}", env!("CARGO_PKG_VERSION"))
}

impl CrawlConfig {
    /// Create a configuration with default values for the given start URL
    pub fn new(start_url: &str) -> Self {
        Self {
            start_url: start_url.to_string(),
            max_depth: default_max_depth(),
            max_pages: default_max_pages(),
            include_images: false,
            fetch_timeout_secs: default_fetch_timeout_secs(),
            politeness_delays_ms: default_politeness_delays_ms(),
            routes: default_routes(),
            user_agent: default_user_agent(),
            include_patterns: Vec::new(),
            exclude_patterns: Vec::new(),
        }
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_minimal_json_gets_defaults() {
        let config: CrawlConfig =
            serde_json::from_str(r#"{"start_url": "https://example.com"}"#).unwrap();

        assert_eq!(config.start_url, "https://example.com");
        assert_eq!(config.max_depth, 2);
        assert_eq!(config.max_pages, 100);
        assert!(!config.include_images);
        assert_eq!(config.fetch_timeout_secs, 30);
        assert_eq!(config.politeness_delays_ms, vec![400, 600, 800]);
        assert_eq!(config.routes, default_routes());
        assert!(config.include_patterns.is_empty());
    }

    #[test]
    fn test_explicit_values_override_defaults() {
        let config: CrawlConfig = serde_json::from_str(
            r#"{
                "start_url": "https://example.com",
                "max_depth": 4,
                "max_pages": 25,
                "include_images": true,
                "politeness_delays_ms": [100],
                "routes": [{"type": "Direct"}],
                "exclude_patterns": ["\\.pdf$"]
            }"#,
        )
        .unwrap();

        assert_eq!(config.max_depth, 4);
        assert_eq!(config.max_pages, 25);
        assert!(config.include_images);
        assert_eq!(config.politeness_delays_ms, vec![100]);
        assert_eq!(config.routes, vec![AccessRoute::Direct]);
        assert_eq!(config.exclude_patterns, vec![r"\.pdf$".to_string()]);
    }

    #[test]
    fn test_from_file_round_trip() {
        let config = CrawlConfig::new("https://example.com");
        let json = serde_json::to_string_pretty(&config).unwrap();

        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(json.as_bytes()).unwrap();

        let loaded = CrawlConfig::from_file(file.path()).unwrap();
        assert_eq!(loaded.start_url, config.start_url);
        assert_eq!(loaded.max_depth, config.max_depth);
        assert_eq!(loaded.routes, config.routes);
        assert_eq!(loaded.user_agent, config.user_agent);
    }

    #[test]
    fn test_from_file_missing_path_errors() {
        assert!(CrawlConfig::from_file("/does/not/exist.json").is_err());
    }
}
