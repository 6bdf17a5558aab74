//! # Estate Repository
//!
//! Store adapters behind the repository traits:
//!
//! ```text
//! PropertyService
//!   ↓  Arc<dyn PropertyRepository> / OwnerRepository / ...
//! MySql*Repository        InMemory*Repository
//!   ↓                       ↓
//! MySQL (sqlx)            InMemoryStore
//! ```
//!
//! Batch lookups accept storage ids and domain ids interchangeably and issue
//! one store request per call.

pub mod memory;
pub mod mysql;
pub mod pool;
pub mod seed;
pub mod traits;

pub use memory::*;
pub use mysql::*;
pub use pool::*;
pub use traits::*;
