//! Quota decisions and usage reports.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The three resource kinds under quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    /// Registered devices.
    Device,
    /// Created groups.
    Group,
    /// Linked external accounts.
    Account,
}

impl ResourceKind {
    /// Singular noun used in messages.
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Device => "device",
            Self::Group => "group",
            Self::Account => "account",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun())
    }
}

/// Outcome of a quota check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotaDecision {
    /// Whether the action may proceed.
    pub allowed: bool,
    /// User-facing reason when denied.
    pub reason: Option<String>,
    /// Current usage, when it was counted.
    pub current: Option<u64>,
    /// Raw limit (`-1` = unlimited).
    pub limit: i64,
}

impl QuotaDecision {
    /// An allowing decision.
    pub fn allow(current: Option<u64>, limit: i64) -> Self {
        Self {
            allowed: true,
            reason: None,
            current,
            limit,
        }
    }

    /// A denying decision with a reason.
    pub fn deny(reason: impl Into<String>, current: Option<u64>, limit: i64) -> Self {
        Self {
            allowed: false,
            reason: Some(reason.into()),
            current,
            limit,
        }
    }
}

/// Usage of one resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceUsage {
    /// Resource kind.
    pub kind: ResourceKind,
    /// Current count; `None` when it could not be obtained.
    pub used: Option<u64>,
    /// Raw limit (`-1` = unlimited).
    pub limit: i64,
}

/// Used-versus-limit report for every resource kind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageSummary {
    /// Tier key the limits came from.
    pub tier: String,
    /// Whether the entitlement is usable.
    pub active: bool,
    /// One entry per resource kind.
    pub resources: Vec<ResourceUsage>,
}
