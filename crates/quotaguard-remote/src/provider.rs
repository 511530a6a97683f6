//! Backend selection for the remote store and catalog.

use std::sync::Arc;

use tracing::info;

use quotaguard_core::config::remote::RemoteConfig;
use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::{EntitlementStore, TierCatalog};

/// The configured entitlement store and tier catalog, built together so
/// they share one connection.
#[derive(Clone)]
pub struct RemoteBackend {
    /// Entitlement documents and device membership.
    pub store: Arc<dyn EntitlementStore>,
    /// Tier definitions.
    pub catalog: Arc<dyn TierCatalog>,
}

impl std::fmt::Debug for RemoteBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RemoteBackend")
            .field("provider", &self.store.provider_type())
            .finish()
    }
}

impl RemoteBackend {
    /// Build the backend named by `config.provider`.
    pub fn from_config(config: &RemoteConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            #[cfg(feature = "http")]
            "http" => {
                info!(
                    base_url = %config.base_url,
                    timeout_seconds = config.timeout_seconds,
                    "Initializing HTTP entitlement backend"
                );
                let client = Arc::new(crate::http::RemoteHttpClient::new(config)?);
                Ok(Self {
                    store: Arc::new(crate::http::HttpEntitlementStore::new(client.clone())),
                    catalog: Arc::new(crate::http::HttpTierCatalog::new(client)),
                })
            }
            #[cfg(feature = "memory")]
            "memory" => {
                info!("Initializing in-memory entitlement backend with seeded catalog");
                Ok(Self {
                    store: Arc::new(crate::memory::MemoryEntitlementStore::new()),
                    catalog: Arc::new(crate::memory::MemoryTierCatalog::seeded()),
                })
            }
            other => Err(AppError::configuration(format!(
                "Unknown remote provider: '{other}'. Supported: http, memory"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_provider() {
        let config = RemoteConfig {
            provider: "ftp".to_string(),
            ..Default::default()
        };
        let err = RemoteBackend::from_config(&config).unwrap_err();
        assert!(err.message.contains("ftp"));
    }

    #[cfg(feature = "memory")]
    #[test]
    fn test_memory_provider() {
        let config = RemoteConfig {
            provider: "memory".to_string(),
            ..Default::default()
        };
        let backend = RemoteBackend::from_config(&config).unwrap();
        assert_eq!(backend.store.provider_type(), "memory");
    }
}
