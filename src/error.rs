use thiserror::Error;

/// Errors that end a crawl run.
///
/// Per-page trouble (a timed-out fetch, an unparsable document) is handled
/// inside the traversal and never shows up here.
#[derive(Debug, Error)]
pub enum CrawlError {
    /// The start URL could not be turned into a crawlable http(s) URL
    #[error("invalid start URL '{url}': {reason}")]
    InvalidStartUrl { url: String, reason: String },

    /// An include or exclude pattern failed to compile
    #[error("invalid URL pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        source: regex::Error,
    },

    /// The HTTP client could not be constructed
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The crawl finished without retrieving a single page
    #[error("no pages could be retrieved from '{url}'")]
    NoPages { url: String },

    /// Cancellation arrived before any page was collected
    #[error("crawl cancelled before any page was retrieved")]
    Cancelled,
}
