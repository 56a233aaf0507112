//! CLI command implementations

pub mod init;
pub mod products;
pub mod run;
pub mod url;
pub mod watch;

use std::sync::Arc;

use anyhow::{Context, Result};

use wearscout::config::Config;
use wearscout::notify::LogNotifier;
use wearscout::scraping::{PageFetcher, ScrapeCoordinator};
use wearscout::store::JsonStore;

pub(crate) fn open_store(config: &Config) -> Result<Arc<JsonStore>> {
    let store = JsonStore::open(config.store.path.clone()).with_context(|| {
        format!(
            "Failed to open catalog store at '{}'",
            config.store.path.display()
        )
    })?;
    Ok(Arc::new(store))
}

pub(crate) fn build_coordinator(
    config: &Config,
    store: Arc<JsonStore>,
) -> Result<Arc<ScrapeCoordinator>> {
    let fetcher =
        Arc::new(PageFetcher::new(&config.scraping).context("Failed to build HTTP client")?);
    Ok(Arc::new(ScrapeCoordinator::new(
        config.sites.clone(),
        fetcher,
        store,
        Arc::new(LogNotifier),
    )))
}
