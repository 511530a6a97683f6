//! The locally cached projection of a remote entitlement.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::instant::FlexibleInstant;

/// One cached entitlement row, keyed by user email.
///
/// Always written whole; never patched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntitlementSnapshot {
    /// Owner email (cache key).
    pub user_email: String,
    /// Tier key.
    pub tier: String,
    /// Expiration, if the remote document had a parseable one.
    pub expiration: Option<FlexibleInstant>,
    /// Device limit.
    pub max_devices: i64,
    /// Group limit.
    pub max_groups: i64,
    /// Linked-account limit.
    pub max_accounts: i64,
    /// Per-account action limit.
    pub max_account_actions: Option<i64>,
    /// Whether the last sync marked the entitlement active.
    pub is_active: bool,
    /// When this row was written.
    pub fetched_at: DateTime<Utc>,
}

impl EntitlementSnapshot {
    /// Whether the snapshot's expiration lies strictly before `now`.
    ///
    /// A snapshot without an expiration never expires.
    pub fn is_expired_at(&self, now: &FlexibleInstant) -> bool {
        self.expiration
            .as_ref()
            .is_some_and(|expiration| expiration.is_before(now))
    }
}
