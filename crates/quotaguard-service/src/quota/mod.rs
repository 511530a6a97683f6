//! Quota enforcement for devices, groups, and linked accounts.

pub mod enforcer;
pub mod messages;

pub use enforcer::QuotaEnforcer;
