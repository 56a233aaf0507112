//! Scraping subsystem
//!
//! The pipeline from configured sites to catalog entries:
//! - `fetcher`: one HTTP GET per page, fixed user agent, bounded timeout
//! - `extractor`: listing-shape and single-page-shape markup extraction
//! - `reconcile`: insert-vs-update against the stored catalog
//! - `coordinator`: the cycle state machine and the ad-hoc URL path
//! - `scheduler`: the recurring-cycle timer

pub mod coordinator;
pub mod extractor;
pub mod fetcher;
pub mod reconcile;
pub mod scheduler;

pub use coordinator::{CycleOutcome, CycleStats, ScrapeCoordinator, ScrapeError};
pub use extractor::{Extractor, ListingItem, PageSummary};
pub use fetcher::{FetchError, FetchPage, FetchedPage, PageFetcher};
pub use reconcile::{reconcile, Reconciled};
pub use scheduler::Scheduler;

use url::Url;

/// Hostname of a URL, or empty when it cannot be parsed
pub(crate) fn host_of(url: &str) -> String {
    Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_string))
        .unwrap_or_default()
}
