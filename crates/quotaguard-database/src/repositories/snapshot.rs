//! Persisted entitlement snapshot repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::{debug, warn};

use quotaguard_core::error::{AppError, ErrorKind};
use quotaguard_core::result::AppResult;
use quotaguard_core::traits::LocalCache;
use quotaguard_core::types::{EntitlementSnapshot, FlexibleInstant};

#[derive(Debug, FromRow)]
struct SnapshotRow {
    user_email: String,
    tier: String,
    expiration: Option<String>,
    max_devices: i64,
    max_groups: i64,
    max_accounts: i64,
    max_account_actions: Option<i64>,
    is_active: bool,
    fetched_at: DateTime<Utc>,
}

impl From<SnapshotRow> for EntitlementSnapshot {
    fn from(row: SnapshotRow) -> Self {
        let expiration = row.expiration.as_deref().and_then(|raw| {
            FlexibleInstant::parse(raw)
                .inspect_err(|e| {
                    warn!(user_email = %row.user_email, error = %e, "Cached expiration is unreadable");
                })
                .ok()
        });
        Self {
            user_email: row.user_email,
            tier: row.tier,
            expiration,
            max_devices: row.max_devices,
            max_groups: row.max_groups,
            max_accounts: row.max_accounts,
            max_account_actions: row.max_account_actions,
            is_active: row.is_active,
            fetched_at: row.fetched_at,
        }
    }
}

/// SQLite-backed [`LocalCache`]: one row per user email, upsert-only.
#[derive(Debug, Clone)]
pub struct EntitlementSnapshotRepository {
    pool: SqlitePool,
}

impl EntitlementSnapshotRepository {
    /// Create a new snapshot repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Find the snapshot for a user.
    pub async fn find_by_email(&self, email: &str) -> AppResult<Option<EntitlementSnapshot>> {
        let row = sqlx::query_as::<_, SnapshotRow>(
            "SELECT * FROM entitlement_snapshots WHERE user_email = ?",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to read snapshot", e))?;
        Ok(row.map(EntitlementSnapshot::from))
    }

    /// Insert or wholly replace a snapshot.
    pub async fn upsert(&self, snapshot: &EntitlementSnapshot) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO entitlement_snapshots \
                (user_email, tier, expiration, max_devices, max_groups, max_accounts, \
                 max_account_actions, is_active, fetched_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?) \
             ON CONFLICT (user_email) DO UPDATE SET \
                tier = excluded.tier, \
                expiration = excluded.expiration, \
                max_devices = excluded.max_devices, \
                max_groups = excluded.max_groups, \
                max_accounts = excluded.max_accounts, \
                max_account_actions = excluded.max_account_actions, \
                is_active = excluded.is_active, \
                fetched_at = excluded.fetched_at",
        )
        .bind(&snapshot.user_email)
        .bind(&snapshot.tier)
        .bind(snapshot.expiration.map(|e| e.to_string()))
        .bind(snapshot.max_devices)
        .bind(snapshot.max_groups)
        .bind(snapshot.max_accounts)
        .bind(snapshot.max_account_actions)
        .bind(snapshot.is_active)
        .bind(snapshot.fetched_at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to upsert snapshot", e))?;

        debug!(user_email = %snapshot.user_email, tier = %snapshot.tier, "Snapshot saved");
        Ok(())
    }

    /// Number of cached users.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM entitlement_snapshots")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count snapshots", e)
            })?;
        Ok(count.max(0) as u64)
    }
}

#[async_trait]
impl LocalCache for EntitlementSnapshotRepository {
    async fn get_snapshot(&self, email: &str) -> AppResult<Option<EntitlementSnapshot>> {
        self.find_by_email(email).await
    }

    async fn save_snapshot(&self, snapshot: &EntitlementSnapshot) -> AppResult<()> {
        self.upsert(snapshot).await
    }
}
