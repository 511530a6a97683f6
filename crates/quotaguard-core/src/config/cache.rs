//! Snapshot cache provider configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Top-level cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CacheConfig {
    /// Cache provider type: `"sqlite"` (persisted) or `"memory"`.
    #[serde(default = "default_provider")]
    #[validate(custom(function = "validate_provider"))]
    pub provider: String,
    /// In-memory cache configuration.
    #[serde(default)]
    pub memory: MemoryCacheConfig,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            memory: MemoryCacheConfig::default(),
        }
    }
}

/// In-memory cache backend configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryCacheConfig {
    /// Maximum number of snapshots held.
    #[serde(default = "default_max_capacity")]
    pub max_capacity: u64,
}

impl Default for MemoryCacheConfig {
    fn default() -> Self {
        Self {
            max_capacity: default_max_capacity(),
        }
    }
}

fn validate_provider(provider: &str) -> Result<(), validator::ValidationError> {
    match provider {
        "sqlite" | "memory" => Ok(()),
        _ => Err(validator::ValidationError::new("unknown_cache_provider")),
    }
}

fn default_provider() -> String {
    "sqlite".to_string()
}

fn default_max_capacity() -> u64 {
    1000
}
