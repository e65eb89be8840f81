use std::collections::HashSet;
use std::time::Duration;
use url::Url;

use crate::results::{CrawlReport, ImageRecord, PageRecord};

/// Accumulated result of a crawl in progress.
///
/// Owned exclusively by the traversal loop; the only outside influence on a
/// running crawl is the cancellation flag.
#[derive(Debug, Default)]
pub struct CrawlState {
    visited: HashSet<String>,
    pages: Vec<PageRecord>,
    images: Vec<ImageRecord>,
    image_urls: HashSet<String>,
}

impl CrawlState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of URLs admitted so far
    pub fn visited_count(&self) -> usize {
        self.visited.len()
    }

    pub fn is_visited(&self, url: &str) -> bool {
        self.visited.contains(url)
    }

    /// Admit a URL; it counts against the page cap from this moment
    pub fn mark_visited(&mut self, url: &str) {
        self.visited.insert(url.to_string());
    }

    /// Record a page at the given depth; the traversal admits each URL once,
    /// so records never duplicate
    pub fn record_page(&mut self, url: &Url, depth: usize) {
        self.pages.push(PageRecord::new(url.to_string(), depth));
    }

    /// Merge image references, keeping the first occurrence of each URL
    pub fn merge_images(&mut self, images: Vec<ImageRecord>) {
        for image in images {
            if self.image_urls.insert(image.url.clone()) {
                self.images.push(image);
            }
        }
    }

    /// Finish the crawl and surface everything collected
    pub fn into_report(self, elapsed: Duration, cancelled: bool) -> CrawlReport {
        CrawlReport {
            pages: self.pages,
            images: self.images,
            elapsed,
            cancelled,
        }
    }
}
