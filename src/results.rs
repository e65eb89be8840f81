use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// How often a page is expected to change, per the sitemap protocol
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    /// Token used in `<changefreq>` elements
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

impl std::fmt::Display for ChangeFreq {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Search priority for a page found at the given depth.
///
/// The start page gets full weight and each further hop costs a tenth,
/// floored at 0.1.
pub fn priority_for_depth(depth: usize) -> f64 {
    if depth == 0 {
        1.0
    } else {
        (1.0 - depth as f64 * 0.1).max(0.1)
    }
}

/// A page recorded during the crawl
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageRecord {
    /// Absolute URL of the page
    pub url: String,

    /// Link-hops from the start URL
    pub depth: usize,

    /// Date the record was created (UTC)
    pub last_modified: NaiveDate,

    /// Expected change frequency
    pub change_freq: ChangeFreq,

    /// Search priority in [0.1, 1.0]
    pub priority: f64,
}

impl PageRecord {
    /// Create a record for a URL visited at the given depth
    pub fn new(url: String, depth: usize) -> Self {
        Self {
            url,
            depth,
            last_modified: chrono::Utc::now().date_naive(),
            change_freq: ChangeFreq::Weekly,
            priority: priority_for_depth(depth),
        }
    }

    /// Priority rendered with one decimal digit, as sitemaps expect
    pub fn priority_label(&self) -> String {
        format!("{:.1}", self.priority)
    }
}

/// An image reference discovered on a crawled page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRecord {
    /// Absolute URL of the image
    pub url: String,

    /// Alt text, empty when the attribute is missing
    #[serde(default)]
    pub alt: String,

    /// Title text, empty when the attribute is missing
    #[serde(default)]
    pub title: String,
}

/// Everything a finished crawl produced
#[derive(Debug, Clone)]
pub struct CrawlReport {
    /// Pages in discovery order
    pub pages: Vec<PageRecord>,

    /// Images deduplicated by URL, in discovery order
    pub images: Vec<ImageRecord>,

    /// Wall-clock duration of the crawl
    pub elapsed: Duration,

    /// Whether the crawl was cut short by cancellation
    pub cancelled: bool,
}

impl CrawlReport {
    /// Group pages by depth, shallowest first, for tree-style rendering
    pub fn pages_by_depth(&self) -> Vec<(usize, Vec<&PageRecord>)> {
        let mut groups: Vec<(usize, Vec<&PageRecord>)> = Vec::new();
        for page in &self.pages {
            match groups.iter_mut().find(|(depth, _)| *depth == page.depth) {
                Some((_, members)) => members.push(page),
                None => groups.push((page.depth, vec![page])),
            }
        }
        groups.sort_by_key(|(depth, _)| *depth);
        groups
    }
}

/// Progress notification sent each time the crawl admits a URL
#[derive(Debug, Clone)]
pub struct ProgressUpdate {
    /// Pages admitted so far, including the one named here
    pub visited: usize,

    /// Page cap for this crawl
    pub max_pages: usize,

    /// URL about to be fetched
    pub url: String,
}
