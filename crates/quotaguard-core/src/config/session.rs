//! Signed-in principal for command-line use.

use serde::{Deserialize, Serialize};

/// The CLI has no login flow; the principal comes from configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionConfig {
    /// User email (local cache key).
    #[serde(default)]
    pub email: Option<String>,
    /// Remote account id.
    #[serde(default)]
    pub account_id: Option<String>,
}
