//! Live resource counters from the application database.

use async_trait::async_trait;

use crate::result::AppResult;

/// Counts resources that are never cached.
#[async_trait]
pub trait PrimaryDatabase: Send + Sync + 'static {
    /// Number of groups the user has created.
    async fn count_groups(&self) -> AppResult<u64>;

    /// Number of linked external accounts.
    async fn count_linked_accounts(&self) -> AppResult<u64>;
}
