//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section.

pub mod cache;
pub mod database;
pub mod entitlement;
pub mod logging;
pub mod remote;
pub mod session;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::cache::CacheConfig;
use self::database::DatabaseConfig;
use self::entitlement::EntitlementConfig;
use self::logging::LoggingConfig;
use self::remote::RemoteConfig;
use self::session::SessionConfig;

use crate::error::AppError;

/// Prefix for environment-variable overrides (`QUOTAGUARD__REMOTE__BASE_URL`).
pub const ENV_PREFIX: &str = "QUOTAGUARD";

/// Root application configuration.
///
/// This struct is the top-level deserialization target for the merged
/// TOML configuration files (default.toml + environment overlay).
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Local SQLite database settings.
    #[serde(default)]
    #[validate(nested)]
    pub database: DatabaseConfig,
    /// Snapshot cache backend.
    #[serde(default)]
    #[validate(nested)]
    pub cache: CacheConfig,
    /// Remote entitlement store and tier catalog.
    #[serde(default)]
    #[validate(nested)]
    pub remote: RemoteConfig,
    /// Tier defaults and fallbacks.
    #[serde(default)]
    #[validate(nested)]
    pub entitlement: EntitlementConfig,
    /// Signed-in principal for the CLI.
    #[serde(default)]
    pub session: SessionConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from TOML files.
    ///
    /// Merges `config/default`, then `config/{env}`, then environment
    /// variables prefixed with `QUOTAGUARD__`, and validates the result.
    pub fn load(env: &str) -> Result<Self, AppError> {
        Self::load_from("config", env)
    }

    /// Same as [`AppConfig::load`] with an explicit configuration directory.
    pub fn load_from(dir: &str, env: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(&format!("{dir}/default")).required(false))
            .add_source(config::File::with_name(&format!("{dir}/{env}")).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;
        parsed.validate()?;
        Ok(parsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.entitlement.default_tier, "bronze");
        assert_eq!(config.entitlement.fallback_period_days, 7);
        assert_eq!(config.cache.provider, "sqlite");
    }

    #[test]
    fn test_load_from_missing_dir_uses_defaults() {
        let config = AppConfig::load_from("does-not-exist", "test").unwrap();
        assert_eq!(config.remote.provider, "http");
        assert_eq!(config.entitlement.fallback_limits.max_account_actions, 2);
    }

    #[test]
    fn test_rejects_zero_period() {
        let mut config = AppConfig::default();
        config.entitlement.fallback_period_days = 0;
        assert!(config.validate().is_err());
    }
}
