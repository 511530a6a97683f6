//! Cache-only entitlement status.

pub mod service;

pub use service::EntitlementStatusService;
