//! Tier catalog lookups with a process-local listing cache.

pub mod service;

pub use service::TierCatalogService;
