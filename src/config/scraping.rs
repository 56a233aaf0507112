//! Fetching and scheduling configuration

use serde::{Deserialize, Serialize};

use super::DEFAULT_USER_AGENT;

/// Web scraping configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapingConfig {
    /// User agent string sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    /// Per-request timeout (seconds)
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Delay before the first scheduled cycle after startup (seconds)
    #[serde(default = "default_startup_delay_secs")]
    pub startup_delay_secs: u64,
}

fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_startup_delay_secs() -> u64 {
    5
}

impl Default for ScrapingConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            request_timeout_secs: default_request_timeout_secs(),
            startup_delay_secs: default_startup_delay_secs(),
        }
    }
}
