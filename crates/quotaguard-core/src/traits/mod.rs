//! Capability traits for every external collaborator.
//!
//! Defined here and implemented by the database, cache and remote crates;
//! the binary wires concrete implementations into the engine once.

pub mod auth;
pub mod catalog;
pub mod local_cache;
pub mod primary_db;
pub mod store;

pub use auth::AuthProvider;
pub use catalog::TierCatalog;
pub use local_cache::LocalCache;
pub use primary_db::PrimaryDatabase;
pub use store::EntitlementStore;
