//! List the cataloged products

use anyhow::Result;

use wearscout::config::Config;
use wearscout::store::CatalogStore;
use wearscout::util::truncate;

use super::open_store;

pub fn list(config: Config, json: bool) -> Result<()> {
    let store = open_store(&config)?;
    let products = store.products()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&products)?);
        return Ok(());
    }

    if products.is_empty() {
        println!("No products cataloged yet");
        return Ok(());
    }

    for product in &products {
        println!(
            "{}  {:<40}  {:<15}  {}",
            product.last_updated.format("%Y-%m-%d"),
            truncate(&product.title, 40),
            truncate(&product.category, 15),
            product.url,
        );
    }

    match store.last_scrape()? {
        Some(at) => println!(
            "\n{} product(s); last scrape {}",
            products.len(),
            at.format("%Y-%m-%d %H:%M UTC")
        ),
        None => println!("\n{} product(s)", products.len()),
    }
    Ok(())
}
