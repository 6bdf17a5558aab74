//! REST API controllers.

pub mod health_controller;
pub mod property_controller;

pub use health_controller::*;
