//! Linked external account repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use quotaguard_core::error::{AppError, ErrorKind};
use quotaguard_core::result::AppResult;

use crate::models::LinkedAccount;

/// Repository for linked external accounts.
#[derive(Debug, Clone)]
pub struct LinkedAccountRepository {
    pool: SqlitePool,
}

impl LinkedAccountRepository {
    /// Create a new linked-account repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all linked accounts, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<LinkedAccount>> {
        sqlx::query_as::<_, LinkedAccount>("SELECT * FROM linked_accounts ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list linked accounts", e)
            })
    }

    /// Count all linked accounts.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM linked_accounts")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to count linked accounts", e)
            })?;
        Ok(count.max(0) as u64)
    }

    /// Link an external account.
    pub async fn create(
        &self,
        provider: &str,
        external_id: &str,
        display_name: Option<&str>,
    ) -> AppResult<LinkedAccount> {
        sqlx::query_as::<_, LinkedAccount>(
            "INSERT INTO linked_accounts (provider, external_id, display_name, created_at) \
             VALUES (?, ?, ?, ?) RETURNING *",
        )
        .bind(provider)
        .bind(external_id)
        .bind(display_name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to link account", e))
    }

    /// Unlink an account. Returns whether a row was removed.
    pub async fn delete(&self, provider: &str, external_id: &str) -> AppResult<bool> {
        let result =
            sqlx::query("DELETE FROM linked_accounts WHERE provider = ? AND external_id = ?")
                .bind(provider)
                .bind(external_id)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to unlink account", e)
                })?;
        Ok(result.rows_affected() > 0)
    }
}
