//! Entitlement status as computed from the local cache.

use serde::{Deserialize, Serialize};

use crate::types::instant::FlexibleInstant;

/// Result of a cache-only status check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementStatus {
    /// Cached row is active and not expired.
    pub is_active: bool,
    /// Tier key.
    pub tier: String,
    /// Expiration lies in the past (or no row exists).
    pub expired: bool,
    /// Expiration instant, if known.
    pub expiration: Option<FlexibleInstant>,
    /// Whole days left, only while not expired.
    pub days_until_expiration: Option<i64>,
    /// Device limit.
    pub max_devices: i64,
    /// Group limit.
    pub max_groups: i64,
    /// Linked-account limit.
    pub max_accounts: i64,
    /// Per-account action limit.
    pub max_account_actions: Option<i64>,
    /// Whether a cached row was found.
    pub from_cache: bool,
}

impl EntitlementStatus {
    /// Active and not expired.
    pub fn is_usable(&self) -> bool {
        self.is_active && !self.expired
    }
}
