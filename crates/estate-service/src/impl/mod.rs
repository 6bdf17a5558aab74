//! Service implementations.
//!
//! Trait definitions live in the parent module (e.g. `property_service.rs`).

pub mod property_service_impl;

pub use property_service_impl::{CacheTtls, PropertyServiceImpl, PropertyServiceImplParameters};
