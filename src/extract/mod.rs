pub mod html;

use thiserror::Error;
use url::Url;

use crate::results::ImageRecord;

/// Links and images pulled out of one fetched document
#[derive(Debug, Clone, Default)]
pub struct Extraction {
    /// Same-domain links in document order, deduplicated
    pub links: Vec<Url>,

    /// Every image reference, in document order
    pub images: Vec<ImageRecord>,
}

/// Error from a link extractor implementation
#[derive(Debug, Error)]
#[error("extraction failed: {0}")]
pub struct ExtractError(pub String);

/// Pulls links and image references out of a fetched document.
///
/// Implementations must resolve and filter links themselves; the crawl
/// schedules whatever comes back here.
pub trait LinkExtractor: Send + Sync {
    fn extract(&self, html: &str, base: &Url) -> Result<Extraction, ExtractError>;
}
