//! # quotaguard-cache
//!
//! Local entitlement snapshot cache for Quotaguard. Supports two modes:
//!
//! - **sqlite**: persisted rows through
//!   [`EntitlementSnapshotRepository`](quotaguard_database::EntitlementSnapshotRepository)
//! - **memory**: in-process cache using [moka](https://crates.io/crates/moka)
//!
//! The provider is selected at runtime based on configuration.

pub mod keys;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::SnapshotCacheManager;
