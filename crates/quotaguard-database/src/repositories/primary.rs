//! [`PrimaryDatabase`] over the local SQLite tables.

use async_trait::async_trait;
use sqlx::SqlitePool;

use quotaguard_core::result::AppResult;
use quotaguard_core::traits::PrimaryDatabase;

use super::{GroupRepository, LinkedAccountRepository};

/// Live counters for groups and linked accounts.
#[derive(Debug, Clone)]
pub struct SqlitePrimaryDatabase {
    groups: GroupRepository,
    accounts: LinkedAccountRepository,
}

impl SqlitePrimaryDatabase {
    /// Create counters over `pool`.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            groups: GroupRepository::new(pool.clone()),
            accounts: LinkedAccountRepository::new(pool),
        }
    }

    /// The group repository.
    pub fn groups(&self) -> &GroupRepository {
        &self.groups
    }

    /// The linked-account repository.
    pub fn accounts(&self) -> &LinkedAccountRepository {
        &self.accounts
    }
}

#[async_trait]
impl PrimaryDatabase for SqlitePrimaryDatabase {
    async fn count_groups(&self) -> AppResult<u64> {
        self.groups.count().await
    }

    async fn count_linked_accounts(&self) -> AppResult<u64> {
        self.accounts.count().await
    }
}
