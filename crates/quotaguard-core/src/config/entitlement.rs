//! Tier defaults and conservative fallbacks.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::types::tier::TierLimits;

/// Which tiers new and lapsed users land on, and what to grant when the
/// catalog cannot be reached.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct EntitlementConfig {
    /// Tier assigned when bootstrapping a missing remote document.
    #[serde(default = "default_tier")]
    #[validate(length(min = 1))]
    pub default_tier: String,
    /// Tier that auto-renews on expiry and that paid tiers fall back to.
    #[serde(default = "default_tier")]
    #[validate(length(min = 1))]
    pub trial_tier: String,
    /// Period used when the catalog entry has none.
    #[serde(default = "default_period_days")]
    #[validate(range(min = 1, max = 3650))]
    pub fallback_period_days: i64,
    /// Limits used when the catalog is unreachable.
    #[serde(default)]
    pub fallback_limits: FallbackLimits,
}

impl Default for EntitlementConfig {
    fn default() -> Self {
        Self {
            default_tier: default_tier(),
            trial_tier: default_tier(),
            fallback_period_days: default_period_days(),
            fallback_limits: FallbackLimits::default(),
        }
    }
}

/// Hardcoded minimal grant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct FallbackLimits {
    /// Devices.
    #[serde(default = "one")]
    pub max_devices: i64,
    /// Groups.
    #[serde(default = "one")]
    pub max_groups: i64,
    /// Linked accounts.
    #[serde(default = "one")]
    pub max_accounts: i64,
    /// Actions per linked account.
    #[serde(default = "two")]
    pub max_account_actions: i64,
}

impl Default for FallbackLimits {
    fn default() -> Self {
        Self {
            max_devices: 1,
            max_groups: 1,
            max_accounts: 1,
            max_account_actions: 2,
        }
    }
}

impl From<FallbackLimits> for TierLimits {
    fn from(limits: FallbackLimits) -> Self {
        Self {
            max_devices: limits.max_devices,
            max_groups: limits.max_groups,
            max_accounts: limits.max_accounts,
            max_account_actions: Some(limits.max_account_actions),
        }
    }
}

fn default_tier() -> String {
    "bronze".to_string()
}

fn default_period_days() -> i64 {
    7
}

fn one() -> i64 {
    1
}

fn two() -> i64 {
    2
}
