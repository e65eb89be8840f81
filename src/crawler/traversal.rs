use std::time::{Duration, Instant};
use tokio::sync::mpsc;
use url::Url;

use super::state::CrawlState;
use super::{CancelFlag, CrawlOutcome};
use crate::config::CrawlConfig;
use crate::error::CrawlError;
use crate::extract::{Extraction, LinkExtractor};
use crate::fetch::HtmlFetcher;
use crate::filter::{LinkFilter, prepare_start_url};
use crate::results::{CrawlReport, ProgressUpdate};

/// One pending unit of work: a URL and its distance from the start page
struct Frame {
    url: Url,
    depth: usize,
}

/// Depth-first crawl from the configured start URL.
///
/// Visits same-origin pages up to the configured depth and page caps,
/// recording one page per admitted URL in discovery order. A page whose
/// fetch fails is still recorded but not descended into; a page whose body
/// is empty is skipped entirely. Cancellation unwinds the remaining
/// worklist and keeps everything collected so far.
///
/// Fails only on an unusable start URL, a bad filter pattern, or when not
/// a single page could be retrieved.
pub async fn run(
    config: &CrawlConfig,
    fetcher: &dyn HtmlFetcher,
    extractor: &dyn LinkExtractor,
    cancel: &CancelFlag,
    progress: Option<mpsc::UnboundedSender<ProgressUpdate>>,
) -> Result<CrawlReport, CrawlError> {
    let start_url = prepare_start_url(&config.start_url)?;
    let link_filter = LinkFilter::new(&config.include_patterns, &config.exclude_patterns)?;
    // A cap of zero would make every crawl fail; treat it as one page
    let max_pages = config.max_pages.max(1);
    let started = Instant::now();

    ::log::info!(
        "Starting crawl of {} (max depth {}, max pages {})",
        start_url,
        config.max_depth,
        max_pages
    );

    let mut state = CrawlState::new();
    let mut worklist = vec![Frame {
        url: start_url.clone(),
        depth: 0,
    }];

    let outcome = loop {
        let Some(frame) = worklist.pop() else {
            break CrawlOutcome::Completed;
        };

        if cancel.is_cancelled() {
            break CrawlOutcome::Cancelled;
        }
        if frame.depth > config.max_depth {
            continue;
        }
        if state.visited_count() >= max_pages {
            break CrawlOutcome::Completed;
        }
        if state.is_visited(frame.url.as_str()) {
            continue;
        }

        if let Some(delay) = delay_for_depth(&config.politeness_delays_ms, frame.depth) {
            tokio::time::sleep(delay).await;
            if cancel.is_cancelled() {
                break CrawlOutcome::Cancelled;
            }
        }

        state.mark_visited(frame.url.as_str());
        if let Some(progress) = &progress {
            let _ = progress.send(ProgressUpdate {
                visited: state.visited_count(),
                max_pages,
                url: frame.url.to_string(),
            });
        }

        ::log::debug!("Fetching {} at depth {}", frame.url, frame.depth);

        let html = match fetcher.fetch_html(&frame.url).await {
            Ok(html) => html,
            Err(e) => {
                // Unreachable pages still belong in the sitemap, but
                // nothing below them can be discovered
                ::log::warn!("Failed to fetch {}: {}", frame.url, e);
                state.record_page(&frame.url, frame.depth);
                continue;
            }
        };

        if cancel.is_cancelled() {
            break CrawlOutcome::Cancelled;
        }

        if html.trim().is_empty() {
            ::log::warn!("Empty HTML for {}", frame.url);
            continue;
        }

        let extraction = match extractor.extract(&html, &frame.url) {
            Ok(extraction) => extraction,
            Err(e) => {
                ::log::warn!("Link extraction failed for {}: {}", frame.url, e);
                Extraction::default()
            }
        };

        state.record_page(&frame.url, frame.depth);
        if config.include_images {
            state.merge_images(extraction.images);
        }

        if frame.depth < config.max_depth {
            // Push in reverse so the leftmost link is crawled first
            for link in extraction.links.into_iter().rev() {
                if state.is_visited(link.as_str()) || !link_filter.admits(&link) {
                    continue;
                }
                worklist.push(Frame {
                    url: link,
                    depth: frame.depth + 1,
                });
            }
        }
    };

    let cancelled = outcome == CrawlOutcome::Cancelled;
    let report = state.into_report(started.elapsed(), cancelled);

    if report.pages.is_empty() {
        if cancelled {
            return Err(CrawlError::Cancelled);
        }
        return Err(CrawlError::NoPages {
            url: start_url.to_string(),
        });
    }

    ::log::info!(
        "Crawl finished with {} pages and {} images in {:.1}s{}",
        report.pages.len(),
        report.images.len(),
        report.elapsed.as_secs_f64(),
        if cancelled { " (cancelled)" } else { "" }
    );

    Ok(report)
}

/// Pause before fetching a frame at `depth`, taken from the parent's depth;
/// the start page never waits
fn delay_for_depth(schedule_ms: &[u64], depth: usize) -> Option<Duration> {
    if depth == 0 || schedule_ms.is_empty() {
        return None;
    }
    let index = (depth - 1).min(schedule_ms.len() - 1);
    Some(Duration::from_millis(schedule_ms[index]))
}
