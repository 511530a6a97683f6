//! In-memory remote backend.

pub mod catalog;
pub mod seed;
pub mod store;

pub use catalog::MemoryTierCatalog;
pub use store::MemoryEntitlementStore;
