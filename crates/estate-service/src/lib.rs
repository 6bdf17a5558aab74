//! # Estate Service
//!
//! Read aggregation for the listings. A page of properties is enriched with
//! owners and first images, a detail with owner, images and sale history.
//! Related records are fetched in batches and memoized in a lookaside cache,
//! and whole pages are cached under a composite query key.

pub mod aggregation;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod mappers;
pub mod property_service;

pub use cache::*;
pub use dto::*;
pub use property_service::*;
pub use r#impl::*;
