//! Quota limit type.

use serde::{Deserialize, Serialize};

/// Raw value that marks a limit as unlimited in documents and snapshots.
pub const UNLIMITED: i64 = -1;

/// A resolved quota ceiling for a countable resource.
///
/// Limits travel as plain integers in remote documents and cached
/// snapshots, where any negative value (conventionally `-1`) means
/// unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuotaLimit {
    /// A fixed maximum number of resources.
    Fixed(u64),
    /// No ceiling.
    Unlimited,
}

impl QuotaLimit {
    /// Whether one more resource may be added when `current` already exist.
    pub fn permits(&self, current: u64) -> bool {
        match self {
            Self::Fixed(max) => current < *max,
            Self::Unlimited => true,
        }
    }

    /// Whether there is no ceiling.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, Self::Unlimited)
    }
}

impl From<i64> for QuotaLimit {
    /// Convert a raw limit. Negative values mean unlimited.
    fn from(value: i64) -> Self {
        if value < 0 {
            Self::Unlimited
        } else {
            Self::Fixed(value as u64)
        }
    }
}

impl std::fmt::Display for QuotaLimit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Fixed(max) => write!(f, "{max}"),
            Self::Unlimited => write!(f, "unlimited"),
        }
    }
}
