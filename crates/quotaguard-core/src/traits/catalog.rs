//! Remote tier catalog.

use async_trait::async_trait;

use crate::result::AppResult;
use crate::types::tier::TierDefinition;

/// Read access to the authoritative tier catalog.
#[async_trait]
pub trait TierCatalog: Send + Sync + 'static {
    /// Look up a single tier by key.
    async fn get_tier(&self, key: &str) -> AppResult<Option<TierDefinition>>;

    /// Every published tier, including `"custom"`; callers filter.
    async fn get_all_tiers(&self) -> AppResult<Vec<TierDefinition>>;
}
