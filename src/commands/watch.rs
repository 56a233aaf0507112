//! Schedule recurring cycles and run until interrupted

use std::time::Duration;

use anyhow::Result;

use wearscout::config::Config;
use wearscout::scraping::Scheduler;
use wearscout::store::CatalogStore;

use super::{build_coordinator, open_store};

pub async fn watch(config: Config) -> Result<()> {
    let store = open_store(&config)?;
    let settings = store.settings()?;

    if settings.auto_scrape_interval <= 0 {
        println!("Automatic scraping is disabled (autoScrapeInterval = 0)");
        return Ok(());
    }

    let coordinator = build_coordinator(&config, store)?;
    let scheduler = Scheduler::new(Duration::from_secs(config.scraping.startup_delay_secs));
    scheduler.configure(settings.auto_scrape_interval, coordinator);

    println!(
        "Scraping every {} hour(s); press Ctrl-C to stop",
        settings.auto_scrape_interval
    );
    tokio::signal::ctrl_c().await?;
    scheduler.stop();
    println!("Stopped");
    Ok(())
}
