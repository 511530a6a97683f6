//! JSON REST backend.

pub mod catalog;
pub mod client;
pub mod store;

pub use catalog::HttpTierCatalog;
pub use client::RemoteHttpClient;
pub use store::HttpEntitlementStore;
