//! Page fetching
//!
//! A single-tier HTTP fetcher: one GET with a fixed browser-like user
//! agent and a bounded timeout. Fetch failures are recoverable at the
//! single-site granularity; callers log and continue with the
//! remaining sites.

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::config::ScrapingConfig;

/// Errors that can occur while fetching a page
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("request for {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

impl FetchError {
    /// The URL the failed request was for
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Http { url, .. } | Self::Status { url, .. } => Some(url),
            Self::Client(_) => None,
        }
    }
}

/// Raw markup retrieved from a page
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// The URL that was requested
    pub url: String,
    /// The URL the response came from (after redirects)
    pub final_url: String,
    /// HTTP status code
    pub status: u16,
    /// Response body
    pub body: String,
}

/// The fetch seam between the orchestrator and the network.
///
/// Production uses [`PageFetcher`]; tests inject canned markup.
#[async_trait]
pub trait FetchPage: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError>;
}

/// HTTP page fetcher backed by a pooled `reqwest` client
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    /// Build the client once: fixed user agent, bounded timeout, gzip.
    pub fn new(config: &ScrapingConfig) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .gzip(true)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FetchPage for PageFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedPage, FetchError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::Http { url: url.to_string(), source: e })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let final_url = response.url().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Http { url: url.to_string(), source: e })?;

        Ok(FetchedPage {
            url: url.to_string(),
            final_url,
            status: status.as_u16(),
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_carries_url() {
        let err = FetchError::Status {
            url: "https://example.com/down".to_string(),
            status: 503,
        };
        assert_eq!(err.url(), Some("https://example.com/down"));
        assert!(err.to_string().contains("503"));
        assert!(err.to_string().contains("https://example.com/down"));
    }

    #[test]
    fn test_fetcher_builds_from_config() {
        let config = ScrapingConfig::default();
        assert!(PageFetcher::new(&config).is_ok());
    }
}
