//! # quotaguard-database
//!
//! SQLite connection management and the repositories backing the
//! persisted entitlement cache and the live group / linked-account
//! counters.

pub mod connection;
pub mod migration;
pub mod models;
pub mod repositories;

pub use connection::DatabasePool;
pub use repositories::{
    EntitlementSnapshotRepository, GroupRepository, LinkedAccountRepository,
    SqlitePrimaryDatabase,
};
