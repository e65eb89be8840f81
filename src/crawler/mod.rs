pub mod state;
mod traversal;


pub use traversal::run;

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Shared handle for cancelling a crawl in flight.
///
/// Clones share one flag. Setting it is safe from any task or thread while
/// the crawl runs; the traversal checks it before each new unit of work.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    /// Create a fresh, unset flag
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; the crawl stops before its next unit of work
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation has been requested
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a traversal ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum CrawlOutcome {
    /// The worklist ran dry or the page cap was reached
    Completed,

    /// The cancellation flag was observed mid-crawl
    Cancelled,
}
