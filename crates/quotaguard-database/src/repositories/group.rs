//! Group repository implementation.

use chrono::Utc;
use sqlx::SqlitePool;

use quotaguard_core::error::{AppError, ErrorKind};
use quotaguard_core::result::AppResult;

use crate::models::Group;

/// Repository for the user's groups.
#[derive(Debug, Clone)]
pub struct GroupRepository {
    pool: SqlitePool,
}

impl GroupRepository {
    /// Create a new group repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// List all groups, oldest first.
    pub async fn find_all(&self) -> AppResult<Vec<Group>> {
        sqlx::query_as::<_, Group>("SELECT * FROM user_groups ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list groups", e))
    }

    /// Count all groups.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM user_groups")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count groups", e))?;
        Ok(count.max(0) as u64)
    }

    /// Create a group.
    pub async fn create(&self, name: &str) -> AppResult<Group> {
        sqlx::query_as::<_, Group>(
            "INSERT INTO user_groups (name, created_at) VALUES (?, ?) RETURNING *",
        )
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create group", e))
    }

    /// Delete a group by name. Returns whether a row was removed.
    pub async fn delete_by_name(&self, name: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM user_groups WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to delete group", e))?;
        Ok(result.rows_affected() > 0)
    }
}
