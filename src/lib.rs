// Re-export modules
pub mod config;
pub mod crawler;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod filter;
pub mod results;
pub mod sitemap;

// Re-export commonly used types for convenience
pub use config::CrawlConfig;
pub use crawler::CancelFlag;
pub use error::CrawlError;
pub use results::{CrawlReport, PageRecord, ProgressUpdate};

use std::time::Duration;
use tokio::sync::mpsc;

use extract::LinkExtractor;
use extract::html::HtmlExtractor;
use fetch::{HtmlFetcher, ProxyClient};

/// Builder for a sitemap-generating crawl of one site.
///
/// Configure limits, optionally grab a cancellation handle and a progress
/// channel, then call `generate` for the finished report.
pub struct SiteMapper {
    config: CrawlConfig,
    cancel: CancelFlag,
    progress: Option<mpsc::UnboundedSender<ProgressUpdate>>,
}

impl SiteMapper {
    /// Create a builder for the given start URL with default limits
    pub fn new(start_url: &str) -> Self {
        Self::from_config(CrawlConfig::new(start_url))
    }

    /// Create a builder from an existing configuration
    pub fn from_config(config: CrawlConfig) -> Self {
        Self {
            config,
            cancel: CancelFlag::new(),
            progress: None,
        }
    }

    /// Set the maximum link depth below the start page
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.config.max_depth = max_depth;
        self
    }

    /// Set the maximum number of pages to visit
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.config.max_pages = max_pages;
        self
    }

    /// Collect image references into the sitemap
    pub fn with_images(mut self, include_images: bool) -> Self {
        self.config.include_images = include_images;
        self
    }

    /// Set the per-request timeout in seconds
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch_timeout_secs = timeout_seconds;
        self
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: CrawlConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = CrawlConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Handle for cancelling the crawl from another task.
    ///
    /// A crawl cancelled after collecting at least one page still returns a
    /// report, with `cancelled` set.
    pub fn cancel_flag(&self) -> CancelFlag {
        self.cancel.clone()
    }

    /// Send a progress update on this channel for every page the crawl admits
    pub fn with_progress(mut self, sender: mpsc::UnboundedSender<ProgressUpdate>) -> Self {
        self.progress = Some(sender);
        self
    }

    /// Run the crawl with the production HTTP fetcher and HTML extractor
    pub async fn generate(self) -> Result<CrawlReport, CrawlError> {
        let fetcher = ProxyClient::new(
            self.config.routes.clone(),
            Duration::from_secs(self.config.fetch_timeout_secs),
            &self.config.user_agent,
        )?;

        self.generate_with(&fetcher, &HtmlExtractor).await
    }

    /// Run the crawl with injected collaborators
    pub async fn generate_with(
        self,
        fetcher: &dyn HtmlFetcher,
        extractor: &dyn LinkExtractor,
    ) -> Result<CrawlReport, CrawlError> {
        crawler::run(&self.config, fetcher, extractor, &self.cancel, self.progress).await
    }
}
