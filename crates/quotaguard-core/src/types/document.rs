//! Remote entitlement document and its merge-write payload.

use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::types::instant::FlexibleInstant;

/// Expiration value as stored remotely.
///
/// Documents written by different clients over the years carry either a
/// timestamp string or the store's native `{seconds, nanos}` object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawExpiration {
    /// ISO-8601 date-time or bare date string.
    Text(String),
    /// Store-native timestamp.
    Native {
        /// Seconds since the Unix epoch.
        seconds: i64,
        /// Sub-second nanoseconds.
        #[serde(default)]
        nanos: u32,
    },
}

impl RawExpiration {
    /// Parse into a [`FlexibleInstant`].
    pub fn parse(&self) -> Result<FlexibleInstant, AppError> {
        match self {
            Self::Text(text) => FlexibleInstant::parse(text),
            Self::Native { seconds, nanos } => FlexibleInstant::from_timestamp(*seconds, *nanos),
        }
    }
}

impl From<FlexibleInstant> for RawExpiration {
    fn from(instant: FlexibleInstant) -> Self {
        Self::Text(instant.to_string())
    }
}

/// The authoritative per-account entitlement document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteEntitlementDocument {
    /// Tier key (e.g. `"bronze"`).
    #[serde(default)]
    pub tier: String,
    /// When the entitlement lapses.
    #[serde(default)]
    pub expiration_instant: Option<RawExpiration>,
    /// Maximum registered devices (`-1` = unlimited).
    #[serde(default)]
    pub max_devices: i64,
    /// Maximum created groups (`-1` = unlimited).
    #[serde(default)]
    pub max_groups: i64,
    /// Maximum linked accounts (`-1` = unlimited).
    #[serde(default)]
    pub max_accounts: i64,
    /// Maximum actions per linked account, when the document overrides the tier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_account_actions: Option<i64>,
    /// Registered device ids, in registration order.
    #[serde(default)]
    pub active_device_ids: Vec<String>,
}

impl RemoteEntitlementDocument {
    /// Whether `device_id` is already registered.
    pub fn has_device(&self, device_id: &str) -> bool {
        self.active_device_ids.iter().any(|id| id == device_id)
    }

    /// Apply a partial update in place (merge semantics).
    pub fn apply(&mut self, update: &LicenseUpdate) {
        if let Some(tier) = &update.tier {
            self.tier = tier.clone();
        }
        if let Some(expiration) = &update.expiration_instant {
            self.expiration_instant = Some(expiration.clone());
        }
        if let Some(max_devices) = update.max_devices {
            self.max_devices = max_devices;
        }
        if let Some(max_groups) = update.max_groups {
            self.max_groups = max_groups;
        }
        if let Some(max_accounts) = update.max_accounts {
            self.max_accounts = max_accounts;
        }
        if let Some(max_account_actions) = update.max_account_actions {
            self.max_account_actions = Some(max_account_actions);
        }
        if let Some(devices) = &update.active_device_ids {
            self.active_device_ids = devices.clone();
        }
    }
}

/// A typed partial write to a [`RemoteEntitlementDocument`].
///
/// Only the fields that are `Some` are sent, so a merge write never clobbers
/// fields the caller did not mean to touch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LicenseUpdate {
    /// New tier key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tier: Option<String>,
    /// New expiration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration_instant: Option<RawExpiration>,
    /// New device limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_devices: Option<i64>,
    /// New group limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_groups: Option<i64>,
    /// New linked-account limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_accounts: Option<i64>,
    /// New per-account action limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_account_actions: Option<i64>,
    /// Replacement device list.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub active_device_ids: Option<Vec<String>>,
}

impl LicenseUpdate {
    /// An update that only moves the expiration.
    pub fn expiration(instant: FlexibleInstant) -> Self {
        Self {
            expiration_instant: Some(instant.into()),
            ..Default::default()
        }
    }

    /// An update that only replaces the device list.
    pub fn devices(devices: Vec<String>) -> Self {
        Self {
            active_device_ids: Some(devices),
            ..Default::default()
        }
    }
}

impl From<&RemoteEntitlementDocument> for LicenseUpdate {
    fn from(doc: &RemoteEntitlementDocument) -> Self {
        Self {
            tier: Some(doc.tier.clone()),
            expiration_instant: doc.expiration_instant.clone(),
            max_devices: Some(doc.max_devices),
            max_groups: Some(doc.max_groups),
            max_accounts: Some(doc.max_accounts),
            max_account_actions: doc.max_account_actions,
            active_device_ids: Some(doc.active_device_ids.clone()),
        }
    }
}
