//! File-backed JSON store

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use parking_lot::Mutex;

use super::{CatalogStore, StoreData, StoreError};
use crate::types::{Product, Settings};

/// Catalog store persisting one JSON document on disk.
///
/// Every mutation rewrites the whole document through a temp-file
/// rename, so readers never observe a half-written file.
pub struct JsonStore {
    path: PathBuf,
    state: Mutex<StoreData>,
}

impl JsonStore {
    /// Open the store at `path`, loading existing state if present.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| StoreError::Io {
                path: path.display().to_string(),
                source: e,
            })?;
            serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
                path: path.display().to_string(),
                source: e,
            })?
        } else {
            StoreData::default()
        };

        Ok(Self {
            path,
            state: Mutex::new(state),
        })
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    fn persist(&self, state: &StoreData) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(state).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
            }
        }

        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| self.io_error(e))?;
        fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))?;
        Ok(())
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogStore for JsonStore {
    fn products(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.state.lock().products.clone())
    }

    fn set_products(&self, products: Vec<Product>) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.products = products;
        self.persist(&state)
    }

    fn seen_urls(&self) -> Result<HashSet<String>, StoreError> {
        Ok(self.state.lock().seen_set())
    }

    fn set_seen_urls(&self, urls: HashSet<String>) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.set_seen(urls);
        self.persist(&state)
    }

    fn last_scrape(&self) -> Result<Option<DateTime<Utc>>, StoreError> {
        Ok(self.state.lock().last_scrape)
    }

    fn set_last_scrape(&self, at: DateTime<Utc>) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.last_scrape = Some(at);
        self.persist(&state)
    }

    fn settings(&self) -> Result<Settings, StoreError> {
        Ok(self.state.lock().settings.clone())
    }

    fn set_settings(&self, settings: Settings) -> Result<(), StoreError> {
        let mut state = self.state.lock();
        state.settings = settings;
        self.persist(&state)
    }
}
