//! Wearscout: wearable AI product discovery
//!
//! A scraping-and-classification engine that discovers and catalogs
//! wearable AI product mentions:
//! - Keyword-table classification of free text into typed attributes
//!   (category, body placement, sensory inputs, features, always-on)
//! - Listing-shape and single-page-shape markup extraction
//! - Insert-vs-update reconciliation against a persisted catalog
//! - A cycle orchestrator with an at-most-one-concurrent-cycle guard
//!   and a recurring-cycle scheduler

pub mod classify;
pub mod config;
pub mod notify;
pub mod scraping;
pub mod store;
pub mod types;
pub mod util;

pub use config::Config;
pub use types::{Product, ProductCandidate, Settings};
