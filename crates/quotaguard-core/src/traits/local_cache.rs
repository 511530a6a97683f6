//! Persisted entitlement cache.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::snapshot::EntitlementSnapshot;

/// One snapshot row per user email, upsert-only.
#[async_trait]
pub trait LocalCache: Send + Sync + 'static {
    /// Read the snapshot for `email`.
    async fn get_snapshot(&self, email: &str) -> AppResult<Option<EntitlementSnapshot>>;

    /// Insert or wholly replace the snapshot for `snapshot.user_email`.
    async fn save_snapshot(&self, snapshot: &EntitlementSnapshot) -> AppResult<()>;
}
