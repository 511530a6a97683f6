//! # quotaguard-remote
//!
//! Clients for the authoritative entitlement store and tier catalog.
//!
//! - **http**: JSON REST backend via [reqwest](https://crates.io/crates/reqwest)
//! - **memory**: process-local store with a seeded catalog, used for
//!   offline runs and tests; can be switched unavailable to simulate outages
//!
//! The backend is selected at runtime based on configuration.

#[cfg(feature = "http")]
pub mod http;
#[cfg(feature = "memory")]
pub mod memory;
pub mod provider;

pub use provider::RemoteBackend;
