//! The catalog a fresh in-memory backend starts with.

use quotaguard_core::types::{CUSTOM_TIER_KEY, TierDefinition, UNLIMITED};

fn tier(
    key: &str,
    name: &str,
    limits: (i64, i64, i64, Option<i64>),
    prices: (f64, f64),
    period_days: Option<i64>,
    features: &[&str],
) -> TierDefinition {
    TierDefinition {
        tier_key: key.to_string(),
        display_name: name.to_string(),
        max_devices: limits.0,
        max_groups: limits.1,
        max_accounts: limits.2,
        max_account_actions: limits.3,
        price_usd: prices.0,
        price_khr: prices.1,
        features: features.iter().map(|f| f.to_string()).collect(),
        period_days,
    }
}

/// Bronze (trial), Silver, Gold, Premium and the unlisted Custom tier.
pub fn default_tiers() -> Vec<TierDefinition> {
    vec![
        tier(
            "bronze",
            "Bronze",
            (1, 1, 1, Some(2)),
            (0.0, 0.0),
            Some(7),
            &["Single device", "One group"],
        ),
        tier(
            "silver",
            "Silver",
            (1, 3, 2, Some(5)),
            (2.99, 12_000.0),
            Some(30),
            &["Single device", "Three groups", "Two linked accounts"],
        ),
        tier(
            "gold",
            "Gold",
            (3, 10, 5, Some(20)),
            (7.99, 32_000.0),
            Some(30),
            &["Three devices", "Ten groups", "Five linked accounts"],
        ),
        tier(
            "premium",
            "Premium",
            (UNLIMITED, UNLIMITED, UNLIMITED, None),
            (19.99, 80_000.0),
            Some(30),
            &["Unlimited devices", "Unlimited groups", "Unlimited linked accounts"],
        ),
        tier(
            CUSTOM_TIER_KEY,
            "Custom",
            (UNLIMITED, UNLIMITED, UNLIMITED, None),
            (0.0, 0.0),
            None,
            &["Negotiated limits"],
        ),
    ]
}
