//! # Estate Server Library
//!
//! Dependency injection modules, metrics export, and application assembly
//! for the estate listings server binary.

pub mod app;
pub mod di;
pub mod metrics;
pub mod startup;
