//! Snapshot cache manager that dispatches to the configured provider.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::info;

use quotaguard_core::config::cache::CacheConfig;
use quotaguard_core::error::AppError;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::LocalCache;
use quotaguard_core::types::EntitlementSnapshot;

use crate::keys::snapshot_key;

/// Snapshot cache that wraps the configured [`LocalCache`] backend and
/// normalizes the email key before every call.
#[derive(Clone)]
pub struct SnapshotCacheManager {
    inner: Arc<dyn LocalCache>,
    provider: &'static str,
}

impl std::fmt::Debug for SnapshotCacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SnapshotCacheManager")
            .field("provider", &self.provider)
            .finish()
    }
}

impl SnapshotCacheManager {
    /// Create a new cache manager from configuration.
    #[cfg(feature = "sqlite")]
    pub fn new(config: &CacheConfig, db: &quotaguard_database::DatabasePool) -> AppResult<Self> {
        match config.provider.as_str() {
            "sqlite" => {
                info!("Initializing SQLite snapshot cache");
                let repo =
                    quotaguard_database::EntitlementSnapshotRepository::new(db.pool().clone());
                Ok(Self::from_provider(Arc::new(repo), "sqlite"))
            }
            _ => Self::without_database(config),
        }
    }

    /// Create a cache manager for providers that need no database.
    pub fn without_database(config: &CacheConfig) -> AppResult<Self> {
        match config.provider.as_str() {
            #[cfg(feature = "memory")]
            "memory" => {
                info!(
                    max_capacity = config.memory.max_capacity,
                    "Initializing in-memory snapshot cache"
                );
                let cache = crate::memory::MemorySnapshotCache::new(&config.memory);
                Ok(Self::from_provider(Arc::new(cache), "memory"))
            }
            other => Err(AppError::configuration(format!(
                "Unknown cache provider: '{other}'. Supported: sqlite, memory"
            ))),
        }
    }

    /// Create a cache manager from an existing provider (for testing).
    pub fn from_provider(provider: Arc<dyn LocalCache>, name: &'static str) -> Self {
        Self {
            inner: provider,
            provider: name,
        }
    }

    /// Name of the active backend.
    pub fn provider_type(&self) -> &'static str {
        self.provider
    }
}

#[async_trait]
impl LocalCache for SnapshotCacheManager {
    async fn get_snapshot(&self, email: &str) -> AppResult<Option<EntitlementSnapshot>> {
        self.inner.get_snapshot(&snapshot_key(email)).await
    }

    async fn save_snapshot(&self, snapshot: &EntitlementSnapshot) -> AppResult<()> {
        let key = snapshot_key(&snapshot.user_email);
        if key == snapshot.user_email {
            return self.inner.save_snapshot(snapshot).await;
        }
        let normalized = EntitlementSnapshot {
            user_email: key,
            ..snapshot.clone()
        };
        self.inner.save_snapshot(&normalized).await
    }
}
