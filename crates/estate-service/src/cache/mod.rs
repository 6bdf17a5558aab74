//! Lookaside caching for the aggregation layer.
//!
//! The cache is reached only through partition and absorb. The backend is an
//! in-process map by default, Redis when several instances should share
//! entries, or disabled.

mod cache_service;
pub mod cache_keys;
mod lookaside;
mod memory_cache;
mod redis_cache;

pub use cache_service::{CacheBackend, LookasideCacheService, LookasideCacheServiceParameters};
pub use lookaside::{CachePartition, LookasideCache, LookasideCacheExt};
pub use memory_cache::MemoryCacheStore;
pub use redis_cache::RedisCacheStore;
