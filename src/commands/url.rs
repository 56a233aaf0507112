//! Manually scrape one URL

use anyhow::{Context, Result};

use wearscout::config::Config;

use super::{build_coordinator, open_store};

pub async fn scrape(config: Config, url: String) -> Result<()> {
    let store = open_store(&config)?;
    let coordinator = build_coordinator(&config, store)?;

    let product = coordinator
        .scrape_url(&url)
        .await
        .with_context(|| format!("Failed to scrape '{url}'"))?;

    println!("{}", serde_json::to_string_pretty(&product)?);
    Ok(())
}
