//! # Estate REST
//!
//! REST API layer using Axum. Serves paged listings, filtered search,
//! property details and first images over the property service, plus
//! health checks and Swagger UI.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
