//! # quotaguard-service
//!
//! Entitlement services for Quotaguard. Each service orchestrates the
//! collaborator traits from `quotaguard-core` to implement one use case:
//! tier lookup, remote-to-local sync, cache-only status, quota enforcement
//! and device membership.
//!
//! Services follow constructor injection: all dependencies are provided
//! at construction time via `Arc` references. [`EntitlementEngine`] wires
//! them together once.

pub mod catalog;
pub mod device;
pub mod engine;
pub mod quota;
pub mod session;
pub mod status;
pub mod sync;

#[cfg(test)]
pub(crate) mod test_support;

pub use catalog::TierCatalogService;
pub use device::DeviceRegistry;
pub use engine::{Collaborators, EntitlementEngine};
pub use quota::QuotaEnforcer;
pub use session::StaticSessionProvider;
pub use status::EntitlementStatusService;
pub use sync::{EntitlementBootstrapper, EntitlementSyncService, ExpirationState};
