//! Discovery notifications
//!
//! Fire-and-forget: the core never awaits a result or retries a
//! failed delivery. The sink is an injected collaborator; the default
//! implementation just logs.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

/// Payload describing a newly discovered or added product
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Discovery {
    pub title: String,
    pub message: String,
    /// Origin hostname
    pub source: String,
    pub url: String,
    pub timestamp: DateTime<Utc>,
}

/// Notification sink contract
pub trait Notify: Send + Sync {
    fn notify(&self, discovery: &Discovery);
}

/// Default sink: structured log lines
#[derive(Debug, Default)]
pub struct LogNotifier;

impl Notify for LogNotifier {
    fn notify(&self, discovery: &Discovery) {
        info!(
            source = %discovery.source,
            url = %discovery.url,
            "{}: {}",
            discovery.title,
            discovery.message
        );
    }
}
