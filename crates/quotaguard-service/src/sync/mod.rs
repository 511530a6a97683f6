//! Remote-to-local entitlement sync.

pub mod bootstrap;
pub mod expiration;
pub mod service;

pub use bootstrap::EntitlementBootstrapper;
pub use expiration::{ExpirationState, TrialTerms};
pub use service::EntitlementSyncService;
