//! # Estate Core
//!
//! Core types, identity rules, and error definitions for the estate
//! listings service. Every other crate in the workspace builds on the
//! entities, pagination types, and [`EstateError`] defined here.

pub mod domain;
pub mod error;
pub mod identity;
pub mod pagination;
pub mod result;
pub mod telemetry;
pub mod validation;

pub use domain::*;
pub use error::*;
pub use identity::*;
pub use pagination::*;
pub use result::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
