//! Lookaside cache component.

use super::{CachePartition, LookasideCache, MemoryCacheStore, RedisCacheStore};
use async_trait::async_trait;
use estate_config::{CacheBackendKind, CacheConfig};
use estate_core::EstateResult;
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// Where cached values live.
#[derive(Debug, Clone)]
pub enum CacheBackend {
    /// Map shared by every request in this process.
    Memory(Arc<MemoryCacheStore>),
    /// Redis, shared across instances.
    Redis(RedisCacheStore),
    /// Every lookup misses and writes are dropped.
    Disabled,
}

impl Default for CacheBackend {
    fn default() -> Self {
        Self::Memory(Arc::new(MemoryCacheStore::new()))
    }
}

impl CacheBackend {
    /// Builds the backend selected by `config`.
    pub fn from_config(config: &CacheConfig) -> EstateResult<Self> {
        let backend = match config.backend {
            CacheBackendKind::Memory => Self::default(),
            CacheBackendKind::Disabled => Self::Disabled,
            CacheBackendKind::Redis => {
                let url = config.redis_url.as_deref().unwrap_or_default();
                Self::Redis(RedisCacheStore::connect(url, config.redis_pool_size)?)
            }
        };
        info!(backend = backend.name(), "Lookaside cache configured");
        Ok(backend)
    }

    /// Short name for logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Redis(_) => "redis",
            Self::Disabled => "disabled",
        }
    }
}

/// Lookaside cache service.
#[derive(Component)]
#[shaku(interface = LookasideCache)]
pub struct LookasideCacheService {
    backend: CacheBackend,
}

impl LookasideCacheService {
    /// Creates a cache over `backend`.
    #[must_use]
    pub fn new(backend: CacheBackend) -> Self {
        Self { backend }
    }

    /// Creates a cache backed by a fresh in-process map.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(CacheBackend::default())
    }

    /// Creates a cache that stores nothing.
    #[must_use]
    pub fn disabled() -> Self {
        Self::new(CacheBackend::Disabled)
    }
}

#[async_trait]
impl LookasideCache for LookasideCacheService {
    async fn partition_raw(&self, keys: &[String]) -> CachePartition<String> {
        match &self.backend {
            CacheBackend::Memory(store) => store.partition(keys),
            CacheBackend::Redis(store) => store.partition(keys).await,
            CacheBackend::Disabled => CachePartition::all_missing(keys),
        }
    }

    async fn absorb_raw(&self, entries: Vec<(String, String)>, ttl: Duration) {
        match &self.backend {
            CacheBackend::Memory(store) => store.absorb(entries, ttl),
            CacheBackend::Redis(store) => store.absorb(entries, ttl).await,
            CacheBackend::Disabled => {}
        }
    }

    fn is_enabled(&self) -> bool {
        !matches!(self.backend, CacheBackend::Disabled)
    }
}

impl std::fmt::Debug for LookasideCacheService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LookasideCacheService")
            .field("backend", &self.backend.name())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{cache_keys, LookasideCacheExt};
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
    struct Sample {
        name: String,
    }

    fn sample(name: &str) -> Sample {
        Sample {
            name: name.to_string(),
        }
    }

    fn keys(values: &[&str]) -> Vec<String> {
        values.iter().map(ToString::to_string).collect()
    }

    #[tokio::test]
    async fn test_absorb_then_partition_has_no_misses() {
        let cache = LookasideCacheService::in_memory();
        let entries = HashMap::from([("a".to_string(), sample("A")), ("b".to_string(), sample("B"))]);
        cache.absorb(cache_keys::OWNER, &entries, Duration::from_secs(60)).await;

        let partition = cache
            .partition::<Sample>(cache_keys::OWNER, &keys(&["a", "b"]))
            .await;
        assert!(partition.misses.is_empty());
        assert_eq!(partition.hits, entries);
    }

    #[tokio::test]
    async fn test_namespaces_are_separate() {
        let cache = LookasideCacheService::in_memory();
        cache
            .put(cache_keys::OWNER, "a", &sample("A"), Duration::from_secs(60))
            .await;

        assert!(cache.get::<Sample>(cache_keys::TRACES, "a").await.is_none());
        assert_eq!(cache.get::<Sample>(cache_keys::OWNER, "a").await, Some(sample("A")));
    }

    #[tokio::test(start_paused = true)]
    async fn test_partition_misses_after_ttl() {
        let cache = LookasideCacheService::in_memory();
        cache
            .put(cache_keys::OWNER, "a", &sample("A"), Duration::from_secs(60))
            .await;

        tokio::time::advance(Duration::from_secs(59)).await;
        assert!(cache.get::<Sample>(cache_keys::OWNER, "a").await.is_some());

        tokio::time::advance(Duration::from_secs(2)).await;
        let partition = cache.partition::<Sample>(cache_keys::OWNER, &keys(&["a"])).await;
        assert!(partition.hits.is_empty());
        assert!(partition.misses.contains("a"));
    }

    #[tokio::test]
    async fn test_undecodable_entry_is_a_miss() {
        let cache = LookasideCacheService::in_memory();
        cache
            .absorb_raw(
                vec![(cache_keys::entry(cache_keys::OWNER, "a"), "not json".to_string())],
                Duration::from_secs(60),
            )
            .await;

        let partition = cache.partition::<Sample>(cache_keys::OWNER, &keys(&["a"])).await;
        assert!(partition.hits.is_empty());
        assert_eq!(partition.misses.len(), 1);
    }

    #[tokio::test]
    async fn test_disabled_cache_always_misses() {
        let cache = LookasideCacheService::disabled();
        assert!(!cache.is_enabled());
        cache
            .put(cache_keys::OWNER, "a", &sample("A"), Duration::from_secs(60))
            .await;

        let partition = cache.partition::<Sample>(cache_keys::OWNER, &keys(&["a"])).await;
        assert!(partition.hits.is_empty());
        assert_eq!(partition.misses.len(), 1);
    }

    #[test]
    fn test_backend_from_config() {
        let mut config = CacheConfig::default();
        assert_eq!(CacheBackend::from_config(&config).unwrap().name(), "memory");

        config.backend = CacheBackendKind::Disabled;
        assert_eq!(CacheBackend::from_config(&config).unwrap().name(), "disabled");
    }
}
