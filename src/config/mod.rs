//! Configuration for wearscout

mod logging;
mod scraping;
mod sites;

pub use logging::{LogFormat, LogLevel, LoggingConfig};
pub use scraping::ScrapingConfig;
pub use sites::{ListingSelectors, ProductSiteProfile, SiteProfile, SitesConfig};

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Browser-like user agent sent with every page request
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Root configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Catalog store location
    #[serde(default)]
    pub store: StoreConfig,
    /// Fetching and scheduling knobs
    #[serde(default)]
    pub scraping: ScrapingConfig,
    /// News and product site lists
    #[serde(default)]
    pub sites: SitesConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            scraping: ScrapingConfig::default(),
            sites: SitesConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Catalog store location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Path of the JSON catalog file
    #[serde(default = "default_store_path")]
    pub path: PathBuf,
}

fn default_store_path() -> PathBuf {
    PathBuf::from("wearscout.json")
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file and validate it.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e))?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config file '{}': {}", path.display(), e))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, else fall back to defaults.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate all fields, collecting every error so the user can fix
    /// the whole file in one pass.
    pub fn validate(&self) -> Result<()> {
        let mut errors: Vec<String> = Vec::new();

        if self.scraping.request_timeout_secs == 0 {
            errors.push("scraping.request_timeout_secs must be positive".to_string());
        }
        if self.scraping.user_agent.trim().is_empty() {
            errors.push("scraping.user_agent must not be empty".to_string());
        }

        for (i, site) in self.sites.news.iter().enumerate() {
            if site.url.trim().is_empty() {
                errors.push(format!("sites.news[{i}].url must not be empty"));
            }
            if site.selectors.articles.trim().is_empty() {
                errors.push(format!("sites.news[{i}].selectors.articles must not be empty"));
            }
        }
        for (i, site) in self.sites.products.iter().enumerate() {
            if site.url.trim().is_empty() {
                errors.push(format!("sites.products[{i}].url must not be empty"));
            }
            if site.name.trim().is_empty() {
                errors.push(format!("sites.products[{i}].name must not be empty"));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            anyhow::bail!("Invalid configuration:\n  - {}", errors.join("\n  - "))
        }
    }

    /// Write a starter config file with the shipped defaults.
    pub fn write_default(path: &Path) -> Result<()> {
        let config = Config::default();
        let toml = toml::to_string_pretty(&config)?;
        std::fs::write(path, toml)
            .map_err(|e| anyhow::anyhow!("Failed to write '{}': {}", path.display(), e))?;
        Ok(())
    }
}
