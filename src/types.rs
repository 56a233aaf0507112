//! Core types for the wearscout catalog

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a catalog product
pub type ProductId = String;

/// Generate a fresh product id
pub fn new_product_id() -> ProductId {
    format!("product-{}", Uuid::new_v4())
}

/// A cataloged wearable AI product.
///
/// Serialized with camelCase keys to match the catalog file the
/// surrounding desktop app reads. `Option` fields are omitted when
/// absent rather than written as null.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Stable identity, generated once and never changed
    pub id: ProductId,
    pub title: String,
    pub description: String,
    pub url: String,
    /// Origin hostname
    pub source: String,
    pub category: String,
    pub body_placement: String,
    /// Accumulated modality tags, `["Unknown"]` when nothing matched
    pub sensory_inputs: Vec<String>,
    /// Discovery-ordered feature tags, no duplicates within one extraction
    pub features: Vec<String>,
    /// Free-text price, "Unknown" when no token was found
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    /// Set by external catalog management, never by the scraper
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pricing_model: Option<String>,
    pub is_always_on: bool,
    /// Only populated by ad-hoc single-page scrapes (h1s then h2s)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headings: Option<Vec<String>>,
    /// Creation time, immutable once set
    pub timestamp: DateTime<Utc>,
    /// Refreshed on every write path
    pub last_updated: DateTime<Utc>,
}

/// A freshly extracted and classified record, before reconciliation
/// against the stored catalog has assigned identity and timestamps.
#[derive(Debug, Clone)]
pub struct ProductCandidate {
    pub title: String,
    pub description: String,
    pub url: String,
    pub source: String,
    pub category: String,
    pub body_placement: String,
    pub sensory_inputs: Vec<String>,
    pub features: Vec<String>,
    /// `None` on the news-listing path (listing pages carry no price);
    /// `None` preserves any stored value on merge
    pub price: Option<String>,
    pub is_always_on: bool,
    /// `None` everywhere except ad-hoc single-page scrapes
    pub headings: Option<Vec<String>>,
}

/// User settings read through the catalog store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Hours between automatic scraping cycles; 0 disables
    #[serde(default = "default_scrape_interval")]
    pub auto_scrape_interval: i64,
    #[serde(default = "default_true")]
    pub notifications_enabled: bool,
}

fn default_scrape_interval() -> i64 {
    24
}

fn default_true() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            auto_scrape_interval: 24,
            notifications_enabled: true,
        }
    }
}
