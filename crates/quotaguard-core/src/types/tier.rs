//! Tier catalog entries.

use serde::{Deserialize, Serialize};

/// Catalog key that is never listed and never fetched by key.
pub const CUSTOM_TIER_KEY: &str = "custom";

/// A subscription tier as published in the remote catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TierDefinition {
    /// Stable tier key (e.g. `"bronze"`).
    pub tier_key: String,
    /// Human-readable name shown in denial messages.
    pub display_name: String,
    /// Maximum registered devices (`-1` = unlimited).
    pub max_devices: i64,
    /// Maximum created groups (`-1` = unlimited).
    pub max_groups: i64,
    /// Maximum linked accounts (`-1` = unlimited).
    pub max_accounts: i64,
    /// Maximum actions per linked account.
    #[serde(default)]
    pub max_account_actions: Option<i64>,
    /// Price in US dollars.
    #[serde(default)]
    pub price_usd: f64,
    /// Price in Cambodian riel.
    #[serde(default)]
    pub price_khr: f64,
    /// Marketing feature list.
    #[serde(default)]
    pub features: Vec<String>,
    /// Subscription period in days.
    #[serde(default)]
    pub period_days: Option<i64>,
}

impl TierDefinition {
    /// Whether this is the unlisted custom tier.
    pub fn is_custom(&self) -> bool {
        self.tier_key == CUSTOM_TIER_KEY
    }

    /// The limits this tier grants.
    pub fn limits(&self) -> TierLimits {
        TierLimits {
            max_devices: self.max_devices,
            max_groups: self.max_groups,
            max_accounts: self.max_accounts,
            max_account_actions: self.max_account_actions,
        }
    }
}

/// The four numeric limits a tier grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierLimits {
    /// Maximum registered devices.
    pub max_devices: i64,
    /// Maximum created groups.
    pub max_groups: i64,
    /// Maximum linked accounts.
    pub max_accounts: i64,
    /// Maximum actions per linked account.
    pub max_account_actions: Option<i64>,
}
