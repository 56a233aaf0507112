//! Catalog persistence
//!
//! The store is an injected collaborator with whole-collection get/set
//! semantics: products, the seen-URL set, the last-scrape timestamp,
//! and user settings. No partial or indexed update contract exists.
//!
//! [`JsonStore`] persists everything as one JSON document on disk, the
//! shape the surrounding desktop app reads. [`MemoryStore`] backs
//! tests and ephemeral runs.

mod json;
mod memory;

pub use json::JsonStore;
pub use memory::MemoryStore;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Product, Settings};

/// Errors surfaced by store implementations
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to access store file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("store file {path} holds invalid JSON: {source}")]
    Corrupt {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-collection catalog store contract
pub trait CatalogStore: Send + Sync {
    fn products(&self) -> Result<Vec<Product>, StoreError>;
    fn set_products(&self, products: Vec<Product>) -> Result<(), StoreError>;

    fn seen_urls(&self) -> Result<HashSet<String>, StoreError>;
    fn set_seen_urls(&self, urls: HashSet<String>) -> Result<(), StoreError>;

    fn last_scrape(&self) -> Result<Option<DateTime<Utc>>, StoreError>;
    fn set_last_scrape(&self, at: DateTime<Utc>) -> Result<(), StoreError>;

    fn settings(&self) -> Result<Settings, StoreError>;
    fn set_settings(&self, settings: Settings) -> Result<(), StoreError>;
}

/// On-disk / in-memory document shape shared by the implementations.
///
/// camelCase keys match the original catalog file; unknown future keys
/// round-trip through `Default` without failing deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub(crate) struct StoreData {
    pub products: Vec<Product>,
    pub scraped_urls: Vec<String>,
    pub last_scrape: Option<DateTime<Utc>>,
    pub settings: Settings,
}

impl StoreData {
    pub(crate) fn seen_set(&self) -> HashSet<String> {
        self.scraped_urls.iter().cloned().collect()
    }

    pub(crate) fn set_seen(&mut self, urls: HashSet<String>) {
        // Stored sorted so repeated persists produce identical files
        let mut sorted: Vec<String> = urls.into_iter().collect();
        sorted.sort();
        self.scraped_urls = sorted;
    }
}
