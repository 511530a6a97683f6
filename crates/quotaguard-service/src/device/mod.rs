//! Device membership on the remote document.

pub mod registry;

pub use registry::DeviceRegistry;
