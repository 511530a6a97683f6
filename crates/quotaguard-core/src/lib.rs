//! # quotaguard-core
//!
//! Core crate for Quotaguard. Contains the capability traits for every
//! external collaborator (remote store, tier catalog, local cache,
//! session provider, primary database), the typed entitlement records
//! that flow between them, configuration schemas, and the unified error
//! system.
//!
//! This crate has **no** internal dependencies on other Quotaguard crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
