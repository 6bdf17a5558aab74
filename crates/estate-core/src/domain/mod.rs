//! # Estate Domain
//!
//! Listing entities as they are read from the store. Each entity carries
//! two identifiers: the storage id assigned by the store and a domain id
//! assigned by the business. Related records may reference either one.

pub mod entities;
pub mod filter;

pub use entities::*;
pub use filter::*;
