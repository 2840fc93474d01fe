//! Client configuration model.

use serde::{Deserialize, Serialize};

/// Default backend base URL.
pub const DEFAULT_API_BASE_URL: &str = "https://api.notiflow.app";

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

fn default_api_base_url() -> String {
    DEFAULT_API_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Configuration for the Notiflow client, loaded from
/// `~/.config/notiflow/config.toml`.
///
/// Every field has a default so a missing or empty file yields a working
/// configuration pointed at production.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the backend API.
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Academic year attached to catalog queries and outgoing messages.
    /// `None` lets the backend pick the current year.
    #[serde(default)]
    pub year: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            timeout_secs: default_timeout_secs(),
            year: None,
        }
    }
}
