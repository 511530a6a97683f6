//! Remote entitlement store configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Where entitlement documents and the tier catalog live.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RemoteConfig {
    /// `"http"` for the REST backend, `"memory"` for a process-local store.
    #[serde(default = "default_provider")]
    pub provider: String,
    /// Base URL of the REST backend.
    #[serde(default = "default_base_url")]
    #[validate(url)]
    pub base_url: String,
    /// Bearer token sent with every request.
    #[serde(default)]
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout")]
    #[validate(range(min = 1, max = 300))]
    pub timeout_seconds: u64,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            base_url: default_base_url(),
            api_key: None,
            timeout_seconds: default_timeout(),
        }
    }
}

fn default_provider() -> String {
    "http".to_string()
}

fn default_base_url() -> String {
    "http://localhost:8080/api".to_string()
}

fn default_timeout() -> u64 {
    15
}
