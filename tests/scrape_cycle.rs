//! End-to-end orchestrator tests
//!
//! Drive full scrape cycles and the manual single-URL path against
//! canned markup, checking identity/merge behavior, relevance gating,
//! the single-cycle guard, and schedule reconfiguration.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use wearscout::config::{ListingSelectors, ProductSiteProfile, SiteProfile, SitesConfig};
use wearscout::notify::{Discovery, Notify};
use wearscout::scraping::{
    CycleOutcome, FetchError, FetchPage, FetchedPage, ScrapeCoordinator, ScrapeError, Scheduler,
};
use wearscout::store::{CatalogStore, MemoryStore, StoreError};
use wearscout::types::{Product, Settings};

/// Serves canned markup; unknown URLs get a 404
struct StubFetcher {
    pages: HashMap<String, String>,
    delay: Option<Duration>,
}

impl StubFetcher {
    fn new(pages: &[(&str, &str)]) -> Self {
        Self {
            pages: pages
                .iter()
                .map(|(url, body)| (url.to_string(), body.to_string()))
                .collect(),
            delay: None,
        }
    }

    fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

#[async_trait]
impl FetchPage for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match self.pages.get(url) {
            Some(body) => Ok(FetchedPage {
                url: url.to_string(),
                final_url: url.to_string(),
                status: 200,
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}

#[derive(Default)]
struct RecordingNotifier {
    discoveries: Mutex<Vec<Discovery>>,
}

impl RecordingNotifier {
    fn count(&self) -> usize {
        self.discoveries.lock().len()
    }
}

impl Notify for RecordingNotifier {
    fn notify(&self, discovery: &Discovery) {
        self.discoveries.lock().push(discovery.clone());
    }
}

/// Counts catalog writes so tests can prove a dropped trigger wrote nothing
#[derive(Default)]
struct CountingStore {
    inner: MemoryStore,
    product_writes: AtomicUsize,
}

impl CatalogStore for CountingStore {
    fn products(&self) -> Result<Vec<Product>, StoreError> {
        self.inner.products()
    }

    fn set_products(&self, products: Vec<Product>) -> Result<(), StoreError> {
        self.product_writes.fetch_add(1, Ordering::SeqCst);
        self.inner.set_products(products)
    }

    fn seen_urls(&self) -> Result<HashSet<String>, StoreError> {
        self.inner.seen_urls()
    }

    fn set_seen_urls(&self, urls: HashSet<String>) -> Result<(), StoreError> {
        self.inner.set_seen_urls(urls)
    }

    fn last_scrape(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        self.inner.last_scrape()
    }

    fn set_last_scrape(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.inner.set_last_scrape(at)
    }

    fn settings(&self) -> Result<Settings, StoreError> {
        self.inner.settings()
    }

    fn set_settings(&self, settings: Settings) -> Result<(), StoreError> {
        self.inner.set_settings(settings)
    }
}

fn news_sites(url: &str) -> SitesConfig {
    SitesConfig {
        news: vec![SiteProfile {
            url: url.to_string(),
            selectors: ListingSelectors {
                articles: "article".to_string(),
                title: "h2".to_string(),
                description: "p".to_string(),
                link: "a".to_string(),
            },
        }],
        products: Vec::new(),
    }
}

const RING_LISTING: &str = r#"
    <html><body>
        <article>
            <h2>New Smart Ring Tracks Sleep with AI</h2>
            <p>always-on heart rate monitor</p>
            <a href="/new-ring">Read more</a>
        </article>
    </body></html>
"#;

const BAND_PAGE: &str = r#"
    <html>
    <head>
        <title>Acme Sense Band</title>
        <meta name="description" content="A wearable band with always-on heart rate AI">
    </head>
    <body>
        <h1>Acme Sense Band</h1>
        <h2>Specs</h2>
        <p>Track sleep with an always-on heart rate sensor for $199.99.</p>
    </body>
    </html>
"#;

#[tokio::test]
async fn ring_article_produces_classified_product_and_one_notification() {
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        notifier.clone(),
    );

    let outcome = coordinator.run_cycle().await;
    assert!(matches!(outcome, CycleOutcome::Completed(_)));

    let products = store.products().unwrap();
    assert_eq!(products.len(), 1);
    let product = &products[0];
    assert_eq!(product.title, "New Smart Ring Tracks Sleep with AI");
    assert_eq!(product.body_placement, "Finger-Worn");
    assert!(product.sensory_inputs.contains(&"Biometric".to_string()));
    assert!(product.is_always_on);
    // Root-relative link resolved against the site's scheme+host
    assert_eq!(product.url, "https://example.com/new-ring");
    assert_eq!(product.source, "example.com");

    assert_eq!(notifier.count(), 1);
    assert!(store
        .seen_urls()
        .unwrap()
        .contains("https://example.com/new-ring"));
    assert!(store.last_scrape().unwrap().is_some());
}

#[tokio::test]
async fn second_cycle_skips_seen_links() {
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        notifier.clone(),
    );

    coordinator.run_cycle().await;
    let first = store.products().unwrap();
    coordinator.run_cycle().await;
    let second = store.products().unwrap();

    assert_eq!(second.len(), 1);
    assert_eq!(second[0].last_updated, first[0].last_updated);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn irrelevant_articles_are_not_cataloged_and_not_marked_seen() {
    let listing = r#"
        <article>
            <h2>Quarterly stock update</h2>
            <p>Shares rose in early trading</p>
            <a href="/markets">Read more</a>
        </article>
        <article>
            <h2>New Smart Ring Tracks Sleep with AI</h2>
            <p>always-on heart rate monitor</p>
            <a href="/new-ring">Read more</a>
        </article>
    "#;
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        listing,
    )]));
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        notifier.clone(),
    );

    coordinator.run_cycle().await;

    let products = store.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].url, "https://example.com/new-ring");

    let seen = store.seen_urls().unwrap();
    assert!(seen.contains("https://example.com/new-ring"));
    // Irrelevant links stay unmarked
    assert!(!seen.contains("https://example.com/markets"));
}

#[tokio::test]
async fn scrape_url_twice_is_idempotent_with_fresh_last_updated() {
    let fetcher = Arc::new(StubFetcher::new(&[("https://shop.example/band", BAND_PAGE)]));
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(
        SitesConfig {
            news: Vec::new(),
            products: Vec::new(),
        },
        fetcher,
        store.clone(),
        notifier.clone(),
    );

    let first = coordinator
        .scrape_url("https://shop.example/band")
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(10)).await;
    let second = coordinator
        .scrape_url("https://shop.example/band")
        .await
        .unwrap();

    assert_eq!(store.products().unwrap().len(), 1);
    assert_eq!(second.id, first.id);
    assert_eq!(second.timestamp, first.timestamp);
    assert!(second.last_updated > first.last_updated);
    // Only the insertion notified
    assert_eq!(notifier.count(), 1);

    assert_eq!(first.title, "Acme Sense Band");
    assert_eq!(first.price.as_deref(), Some("$199.99"));
    assert!(first.is_always_on);
    assert_eq!(
        first.headings.as_deref(),
        Some(&["Acme Sense Band".to_string(), "Specs".to_string()][..])
    );
}

#[tokio::test]
async fn scrape_url_propagates_fetch_failure() {
    let fetcher = Arc::new(StubFetcher::new(&[]));
    let store = Arc::new(MemoryStore::new());
    let coordinator = ScrapeCoordinator::new(
        SitesConfig {
            news: Vec::new(),
            products: Vec::new(),
        },
        fetcher,
        store.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    let err = coordinator
        .scrape_url("https://gone.example/")
        .await
        .unwrap_err();
    assert!(matches!(err, ScrapeError::Fetch(FetchError::Status { status: 404, .. })));
    assert!(store.products().unwrap().is_empty());
    assert!(store.seen_urls().unwrap().is_empty());
}

#[tokio::test]
async fn product_site_uses_fixed_name_for_identity() {
    let sites = SitesConfig {
        news: Vec::new(),
        products: vec![ProductSiteProfile {
            url: "https://band.example/".to_string(),
            name: "Acme Sense Band".to_string(),
            category: "Health Monitor".to_string(),
        }],
    };
    let fetcher = Arc::new(StubFetcher::new(&[("https://band.example/", BAND_PAGE)]));
    let store = Arc::new(MemoryStore::new());
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(sites, fetcher, store.clone(), notifier.clone());

    coordinator.run_cycle().await;
    coordinator.run_cycle().await;

    let products = store.products().unwrap();
    assert_eq!(products.len(), 1);
    assert_eq!(products[0].title, "Acme Sense Band");
    assert_eq!(products[0].category, "Health Monitor");
    assert_eq!(products[0].price.as_deref(), Some("$199.99"));
    // Re-scrapes update in place; only the first run notified
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn failed_site_does_not_abort_the_cycle() {
    let sites = SitesConfig {
        news: vec![
            SiteProfile {
                url: "https://down.example/wearables".to_string(),
                selectors: ListingSelectors {
                    articles: "article".to_string(),
                    title: "h2".to_string(),
                    description: "p".to_string(),
                    link: "a".to_string(),
                },
            },
            news_sites("https://example.com/wearables").news.remove(0),
        ],
        products: Vec::new(),
    };
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::new());
    let coordinator = ScrapeCoordinator::new(
        sites,
        fetcher,
        store.clone(),
        Arc::new(RecordingNotifier::default()),
    );

    let outcome = coordinator.run_cycle().await;
    let CycleOutcome::Completed(stats) = outcome else {
        panic!("cycle should complete");
    };
    assert_eq!(stats.site_errors, 1);
    assert_eq!(stats.news_sites, 1);
    // The healthy site was still processed
    assert_eq!(store.products().unwrap().len(), 1);
}

#[tokio::test]
async fn second_trigger_during_running_cycle_is_dropped() {
    let fetcher = Arc::new(
        StubFetcher::new(&[("https://example.com/wearables", RING_LISTING)])
            .with_delay(Duration::from_millis(200)),
    );
    let store = Arc::new(CountingStore::default());
    let coordinator = Arc::new(ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        Arc::new(RecordingNotifier::default()),
    ));

    let background = {
        let coordinator = coordinator.clone();
        tokio::spawn(async move { coordinator.run_cycle().await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    // Fires while the first cycle is still fetching
    let second = coordinator.run_cycle().await;
    assert_eq!(second, CycleOutcome::AlreadyRunning);

    let first = background.await.unwrap();
    assert!(matches!(first, CycleOutcome::Completed(_)));
    // Exactly one pass over the configured site wrote the catalog
    assert_eq!(store.product_writes.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn configure_zero_disarms_the_schedule() {
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::new());
    let coordinator = Arc::new(ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        Arc::new(RecordingNotifier::default()),
    ));

    let scheduler = Scheduler::new(Duration::from_millis(30));
    scheduler.configure(24, coordinator.clone());
    scheduler.configure(0, coordinator);
    assert!(!scheduler.is_armed());

    tokio::time::sleep(Duration::from_millis(120)).await;
    // The replaced schedule never fired
    assert!(store.last_scrape().unwrap().is_none());
    assert!(store.products().unwrap().is_empty());
}

#[tokio::test]
async fn armed_schedule_runs_the_startup_cycle() {
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::new());
    let coordinator = Arc::new(ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        Arc::new(RecordingNotifier::default()),
    ));

    let scheduler = Scheduler::new(Duration::from_millis(20));
    scheduler.configure(24, coordinator);
    tokio::time::sleep(Duration::from_millis(150)).await;

    assert!(store.last_scrape().unwrap().is_some());
    assert_eq!(store.products().unwrap().len(), 1);
    scheduler.stop();
    assert!(!scheduler.is_armed());
}

#[tokio::test]
async fn notifications_honor_the_stored_toggle() {
    let fetcher = Arc::new(StubFetcher::new(&[(
        "https://example.com/wearables",
        RING_LISTING,
    )]));
    let store = Arc::new(MemoryStore::with_settings(Settings {
        auto_scrape_interval: 24,
        notifications_enabled: false,
    }));
    let notifier = Arc::new(RecordingNotifier::default());
    let coordinator = ScrapeCoordinator::new(
        news_sites("https://example.com/wearables"),
        fetcher,
        store.clone(),
        notifier.clone(),
    );

    coordinator.run_cycle().await;
    assert_eq!(store.products().unwrap().len(), 1);
    assert_eq!(notifier.count(), 0);
}
