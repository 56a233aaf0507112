//! Scrape orchestration
//!
//! Drives one full cycle across the configured news and product sites:
//! fetch, extract, classify, reconcile, persist, notify. A cycle runs
//! at most once at a time; a trigger landing mid-cycle is dropped, not
//! queued. The ad-hoc single-URL path shares the same reconciliation
//! and identity behavior and may run concurrently with a cycle — all
//! catalog and seen-URL writes go through one lock.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::classify::Classifier;
use crate::config::{ProductSiteProfile, SiteProfile, SitesConfig};
use crate::notify::{Discovery, Notify};
use crate::store::{CatalogStore, StoreError};
use crate::types::{Product, ProductCandidate};

use super::extractor::Extractor;
use super::fetcher::{FetchError, FetchPage};
use super::host_of;
use super::reconcile::{reconcile, Reconciled};

/// Errors from the manual single-URL path; inside a cycle both kinds
/// are recoverable at the single-site granularity.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Counters for one completed cycle
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CycleStats {
    /// News sites processed to completion
    pub news_sites: usize,
    /// Product sites processed to completion
    pub product_sites: usize,
    /// Sites skipped after a fetch or store failure
    pub site_errors: usize,
    pub new_products: usize,
    pub updated_products: usize,
}

/// What a cycle trigger resulted in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CycleOutcome {
    Completed(CycleStats),
    /// Another cycle was mid-flight; this trigger was dropped
    AlreadyRunning,
}

/// Clears the in-progress flag on every exit path, so a failed cycle
/// can never wedge the coordinator into a permanent busy state.
struct RunningGuard<'a>(&'a AtomicBool);

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Orchestrates scraping cycles and the manual single-URL path
pub struct ScrapeCoordinator {
    sites: SitesConfig,
    fetcher: Arc<dyn FetchPage>,
    extractor: Extractor,
    classifier: Classifier,
    store: Arc<dyn CatalogStore>,
    notifier: Arc<dyn Notify>,
    /// Instance-owned cycle-in-progress flag
    running: AtomicBool,
    /// Serializes all catalog/seen-URL read-modify-write sections
    write_lock: Mutex<()>,
}

impl ScrapeCoordinator {
    pub fn new(
        sites: SitesConfig,
        fetcher: Arc<dyn FetchPage>,
        store: Arc<dyn CatalogStore>,
        notifier: Arc<dyn Notify>,
    ) -> Self {
        Self {
            sites,
            fetcher,
            extractor: Extractor::new(),
            classifier: Classifier::default(),
            store,
            notifier,
            running: AtomicBool::new(false),
            write_lock: Mutex::new(()),
        }
    }

    /// Whether a cycle is currently in flight
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Run one full cycle over all configured sites.
    ///
    /// Site failures are logged and skipped; no error aborts the
    /// remaining sites. A trigger while a cycle is in flight returns
    /// [`CycleOutcome::AlreadyRunning`] without touching the catalog.
    pub async fn run_cycle(&self) -> CycleOutcome {
        if self
            .running
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            info!("scrape cycle already in progress, dropping trigger");
            return CycleOutcome::AlreadyRunning;
        }
        let _guard = RunningGuard(&self.running);

        info!(
            news_sites = self.sites.news.len(),
            product_sites = self.sites.products.len(),
            "starting scrape cycle"
        );
        let mut stats = CycleStats::default();

        for site in &self.sites.news {
            match self.scrape_news_site(site, &mut stats).await {
                Ok(()) => stats.news_sites += 1,
                Err(e) => {
                    warn!(site = %site.url, error = %e, "news site scrape failed");
                    stats.site_errors += 1;
                }
            }
        }

        for site in &self.sites.products {
            match self.scrape_product_site(site, &mut stats).await {
                Ok(()) => stats.product_sites += 1,
                Err(e) => {
                    warn!(site = %site.url, error = %e, "product site scrape failed");
                    stats.site_errors += 1;
                }
            }
        }

        if let Err(e) = self.store.set_last_scrape(Utc::now()) {
            warn!(error = %e, "failed to record last scrape time");
        }

        info!(
            new = stats.new_products,
            updated = stats.updated_products,
            errors = stats.site_errors,
            "scrape cycle complete"
        );
        CycleOutcome::Completed(stats)
    }

    /// Scan one news listing page for relevant article tuples.
    async fn scrape_news_site(
        &self,
        site: &SiteProfile,
        stats: &mut CycleStats,
    ) -> Result<(), ScrapeError> {
        debug!(site = %site.url, "scraping news site");
        let page = self.fetcher.fetch(&site.url).await?;
        let items = self.extractor.listing(&page.body, site);
        debug!(site = %site.url, blocks = items.len(), "extracted listing blocks");

        let source = host_of(&site.url);
        let mut discoveries = Vec::new();

        {
            let _write = self.write_lock.lock().await;
            let mut products = self.store.products()?;
            let mut seen = self.store.seen_urls()?;

            for item in items {
                let Some(link) = item.link else { continue };
                if seen.contains(&link) {
                    continue;
                }

                let combined = format!("{} {}", item.title, item.description);
                if !self.classifier.is_relevant(&combined) {
                    // Left unmarked: a later revisit with a richer
                    // description can still surface this link
                    continue;
                }

                debug!(title = %item.title, "found wearable AI article");
                let description = if item.description.is_empty() {
                    "No description available".to_string()
                } else {
                    item.description.clone()
                };
                let candidate = ProductCandidate {
                    title: item.title.clone(),
                    description,
                    url: link.clone(),
                    source: source.clone(),
                    category: self.classifier.category(&combined),
                    body_placement: self.classifier.body_placement(&combined),
                    sensory_inputs: self.classifier.sensory_inputs(&combined),
                    features: self.classifier.features(&combined),
                    price: None,
                    is_always_on: self.classifier.is_always_on(&combined),
                    headings: None,
                };

                let Reconciled {
                    products: merged,
                    product,
                    inserted,
                } = reconcile(candidate, products, Utc::now());
                products = merged;
                seen.insert(link.clone());

                if inserted {
                    stats.new_products += 1;
                    discoveries.push(Discovery {
                        title: "New Wearable AI Product Discovered".to_string(),
                        message: format!("Found new product: {}", product.title),
                        source: source.clone(),
                        url: link,
                        timestamp: Utc::now(),
                    });
                } else {
                    stats.updated_products += 1;
                }
            }

            // One site's catalog and seen-set mutations land together
            self.store.set_seen_urls(seen)?;
            self.store.set_products(products)?;
        }

        for discovery in &discoveries {
            self.emit(discovery);
        }
        Ok(())
    }

    /// Catalog one configured product home page.
    async fn scrape_product_site(
        &self,
        profile: &ProductSiteProfile,
        stats: &mut CycleStats,
    ) -> Result<(), ScrapeError> {
        debug!(site = %profile.url, "scraping product site");
        let page = self.fetcher.fetch(&profile.url).await?;
        let summary = self.extractor.page(&page.body);
        let body = summary.body_text.to_lowercase();

        let candidate = ProductCandidate {
            // The profile's fixed display name is the identity title
            title: profile.name.clone(),
            description: summary.description,
            url: profile.url.clone(),
            source: host_of(&profile.url),
            category: profile.category.clone(),
            body_placement: self.classifier.body_placement(&body),
            sensory_inputs: self.classifier.sensory_inputs(&body),
            features: self.classifier.features(&body),
            price: Some(summary.price),
            is_always_on: self.classifier.is_always_on(&body),
            headings: None,
        };

        let (product, inserted) = {
            let _write = self.write_lock.lock().await;
            let products = self.store.products()?;
            let Reconciled {
                products,
                product,
                inserted,
            } = reconcile(candidate, products, Utc::now());
            self.store.set_products(products)?;
            (product, inserted)
        };

        if inserted {
            stats.new_products += 1;
            info!(product = %product.title, "added new product");
            self.emit(&Discovery {
                title: "New Wearable AI Product Added".to_string(),
                message: format!("Added {} to the database", product.title),
                source: product.source.clone(),
                url: product.url.clone(),
                timestamp: Utc::now(),
            });
        } else {
            stats.updated_products += 1;
            debug!(product = %product.title, "updated product");
        }
        Ok(())
    }

    /// Manually scrape one URL: the user-initiated path.
    ///
    /// Fetch failures propagate to the caller; reconciliation and
    /// identity behave exactly as on the product-site path.
    pub async fn scrape_url(&self, url: &str) -> Result<Product, ScrapeError> {
        info!(%url, "manually scraping url");
        let page = self.fetcher.fetch(url).await?;
        let summary = self.extractor.page(&page.body);
        let body = summary.body_text.to_lowercase();
        let combined = format!("{} {} {}", summary.title, summary.description, body);

        let description = if !summary.description.is_empty() {
            summary.description.clone()
        } else if let Some(first_heading) = summary.headings.first() {
            first_heading.clone()
        } else {
            "No description available".to_string()
        };

        let candidate = ProductCandidate {
            title: summary.title.clone(),
            description,
            url: url.to_string(),
            source: host_of(url),
            category: self.classifier.category(&combined),
            body_placement: self.classifier.body_placement(&body),
            sensory_inputs: self.classifier.sensory_inputs(&body),
            features: self.classifier.features(&body),
            price: Some(summary.price),
            is_always_on: self.classifier.is_always_on(&body),
            headings: Some(summary.headings),
        };

        let (product, inserted) = {
            let _write = self.write_lock.lock().await;
            let products = self.store.products()?;
            let mut seen = self.store.seen_urls()?;

            let Reconciled {
                products,
                product,
                inserted,
            } = reconcile(candidate, products, Utc::now());

            seen.insert(url.to_string());
            self.store.set_seen_urls(seen)?;
            self.store.set_products(products)?;
            self.store.set_last_scrape(Utc::now())?;
            (product, inserted)
        };

        if inserted {
            self.emit(&Discovery {
                title: "New Wearable AI Product Added".to_string(),
                message: format!("Added {} to the database", product.title),
                source: product.source.clone(),
                url: product.url.clone(),
                timestamp: Utc::now(),
            });
        }
        Ok(product)
    }

    /// Fire-and-forget, honoring the stored notifications toggle.
    fn emit(&self, discovery: &Discovery) {
        let enabled = self
            .store
            .settings()
            .map(|s| s.notifications_enabled)
            .unwrap_or(true);
        if enabled {
            self.notifier.notify(discovery);
        }
    }
}
