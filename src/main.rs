//! Wearscout CLI
//!
//! Discovers and catalogs wearable AI products by scraping configured
//! news and product sites.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use wearscout::Config;

#[derive(Parser)]
#[command(name = "wearscout")]
#[command(about = "Discovers and catalogs wearable AI products")]
#[command(version)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "wearscout.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one scrape cycle over the configured sites
    Run,

    /// Schedule recurring cycles per the stored settings and run
    /// until interrupted
    Watch,

    /// Scrape a single URL and print the resulting product
    Url {
        /// The page to scrape
        url: String,
    },

    /// List the cataloged products
    Products {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Write a starter configuration file
    Init {
        /// Where to write it
        #[arg(default_value = "wearscout.toml")]
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(&cli.config)?;
    config.logging.init();

    match cli.command {
        Commands::Run => commands::run::run(config).await,
        Commands::Watch => commands::watch::watch(config).await,
        Commands::Url { url } => commands::url::scrape(config, url).await,
        Commands::Products { json } => commands::products::list(config, json),
        Commands::Init { path } => commands::init::init(path),
    }
}
