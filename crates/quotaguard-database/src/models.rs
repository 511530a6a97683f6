//! Row types for the group and linked-account tables.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A group the user has created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Group {
    /// Row id.
    pub id: i64,
    /// Unique group name.
    pub name: String,
    /// Creation time.
    pub created_at: DateTime<Utc>,
}

/// An external account linked to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LinkedAccount {
    /// Row id.
    pub id: i64,
    /// Provider name (e.g. `"telegram"`).
    pub provider: String,
    /// Provider-side identifier.
    pub external_id: String,
    /// Optional label.
    pub display_name: Option<String>,
    /// Link time.
    pub created_at: DateTime<Utc>,
}
