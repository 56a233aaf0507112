//! In-memory store for tests and ephemeral runs

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{CatalogStore, StoreData, StoreError};
use crate::types::{Product, Settings};

/// Catalog store held entirely in memory
#[derive(Default)]
pub struct MemoryStore {
    state: Mutex<StoreData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        let store = Self::new();
        store.state.lock().settings = settings;
        store
    }
}

impl CatalogStore for MemoryStore {
    fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.lock().products.clone())
    }

    fn set_products(&self, products: Vec<Product>) -> Result<(), StoreError> {
        self.state.lock().products = products;
        Ok(())
    }

    fn seen_urls(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.state.lock().seen_set())
    }

    fn set_seen_urls(&self, urls: HashSet<String>) -> Result<(), StoreError> {
        self.state.lock().set_seen(urls);
        Ok(())
    }

    fn last_scrape(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.state.lock().last_scrape)
    }

    fn set_last_scrape(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        self.state.lock().last_scrape = Some(at);
        Ok(())
    }

    fn settings(&self) -> Result<Settings, StoreError> {
        Ok(self.state.lock().settings.clone())
    }

    fn set_settings(&self, settings: Settings) -> Result<(), StoreError> {
        self.state.lock().settings = settings;
        Ok(())
    }
}
