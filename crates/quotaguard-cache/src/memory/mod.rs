//! In-memory snapshot cache.

pub mod store;

pub use store::MemorySnapshotCache;
