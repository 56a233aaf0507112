//! Run one scrape cycle

use anyhow::Result;

use wearscout::config::Config;
use wearscout::scraping::CycleOutcome;

use super::{build_coordinator, open_store};

pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config)?;
    let coordinator = build_coordinator(&config, store)?;

    match coordinator.run_cycle().await {
        CycleOutcome::Completed(stats) => {
            println!(
                "Cycle complete: {} new, {} updated, {} site error(s) across {} site(s)",
                stats.new_products,
                stats.updated_products,
                stats.site_errors,
                stats.news_sites + stats.product_sites + stats.site_errors,
            );
        }
        CycleOutcome::AlreadyRunning => {
            println!("A scrape cycle is already running");
        }
    }
    Ok(())
}
