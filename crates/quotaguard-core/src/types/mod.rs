//! Entitlement records shared by every Quotaguard crate.

pub mod decision;
pub mod document;
pub mod instant;
pub mod limit;
pub mod principal;
pub mod snapshot;
pub mod status;
pub mod tier;

pub use decision::{QuotaDecision, ResourceKind, ResourceUsage, UsageSummary};
pub use document::{LicenseUpdate, RawExpiration, RemoteEntitlementDocument};
pub use instant::FlexibleInstant;
pub use limit::{QuotaLimit, UNLIMITED};
pub use principal::Principal;
pub use snapshot::EntitlementSnapshot;
pub use status::EntitlementStatus;
pub use tier::{CUSTOM_TIER_KEY, TierDefinition, TierLimits};
