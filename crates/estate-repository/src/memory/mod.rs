//! In-memory store adapter.
//!
//! Backs the `memory` store backend and the test suites. All four
//! repositories share one [`InMemoryStore`].

mod repositories;
mod store;

pub use repositories::*;
pub use store::InMemoryStore;
