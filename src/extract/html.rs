use scraper::{Html, Selector};
use std::collections::HashSet;
use url::Url;

use super::{ExtractError, Extraction, LinkExtractor};
use crate::filter::{normalize_href, same_domain};
use crate::results::ImageRecord;

/// Extracts anchor targets and image references from HTML documents
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlExtractor;

impl LinkExtractor for HtmlExtractor {
    fn extract(&self, html: &str, base: &Url) -> Result<Extraction, ExtractError> {
        let doc = Html::parse_document(html);

        // Extract same-domain links, first occurrence wins
        let anchor_selector = Selector::parse("a[href]").unwrap();
        let mut seen = HashSet::new();
        let mut links = Vec::new();
        for href in doc
            .select(&anchor_selector)
            .filter_map(|e| e.value().attr("href"))
        {
            if let Some(resolved) = normalize_href(href, base) {
                if same_domain(&resolved, base) && seen.insert(resolved.to_string()) {
                    links.push(resolved);
                }
            }
        }

        // Extract every image reference; the sitemap builder decides later
        // which images belong to which page
        let image_selector = Selector::parse("img[src]").unwrap();
        let images = doc
            .select(&image_selector)
            .filter_map(|e| {
                let src = e.value().attr("src")?;
                let resolved = normalize_href(src, base)?;
                Some(ImageRecord {
                    url: resolved.to_string(),
                    alt: e.value().attr("alt").unwrap_or_default().to_string(),
                    title: e.value().attr("title").unwrap_or_default().to_string(),
                })
            })
            .collect::<Vec<_>>();

        ::log::debug!(
            "Extracted {} links and {} images from {}",
            links.len(),
            images.len(),
            base
        );

        Ok(Extraction { links, images })
    }
}
