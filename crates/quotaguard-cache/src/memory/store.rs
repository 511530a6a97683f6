//! In-memory snapshot cache using the moka crate.

use async_trait::async_trait;
use moka::future::Cache;
use tracing::debug;

use quotaguard_core::config::cache::MemoryCacheConfig;
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::LocalCache;
use quotaguard_core::types::EntitlementSnapshot;

/// Process-local [`LocalCache`]. Snapshots live until evicted by capacity;
/// there is no TTL because staleness is decided by the expiration field.
#[derive(Debug, Clone)]
pub struct MemorySnapshotCache {
    cache: Cache<String, EntitlementSnapshot>,
}

impl MemorySnapshotCache {
    /// Create a new in-memory cache from configuration.
    pub fn new(config: &MemoryCacheConfig) -> Self {
        let cache = Cache::builder().max_capacity(config.max_capacity).build();
        Self { cache }
    }
}

#[async_trait]
impl LocalCache for MemorySnapshotCache {
    async fn get_snapshot(&self, email: &str) -> AppResult<Option<EntitlementSnapshot>> {
        Ok(self.cache.get(email).await)
    }

    async fn save_snapshot(&self, snapshot: &EntitlementSnapshot) -> AppResult<()> {
        self.cache
            .insert(snapshot.user_email.clone(), snapshot.clone())
            .await;
        debug!(user_email = %snapshot.user_email, "Snapshot cached in memory");
        Ok(())
    }
}
