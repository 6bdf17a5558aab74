//! Redis-backed cache store.

use super::CachePartition;
use deadpool_redis::{redis, Config, Pool, PoolConfig, Runtime};
use estate_core::{EstateError, EstateResult};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Cache store shared between instances through Redis.
///
/// Reads use one `MGET`, writes one pipeline of `SET ... EX`. Any Redis error
/// is logged and the call degrades to all misses or a skipped write.
#[derive(Clone)]
pub struct RedisCacheStore {
    pool: Arc<Pool>,
}

impl RedisCacheStore {
    /// Wraps an existing pool.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool }
    }

    /// Builds a pool for `url` with at most `pool_size` connections.
    pub fn connect(url: &str, pool_size: usize) -> EstateResult<Self> {
        let mut config = Config::from_url(url);
        config.pool = Some(PoolConfig::new(pool_size.max(1)));
        let pool = config
            .create_pool(Some(Runtime::Tokio1))
            .map_err(|e| EstateError::Configuration(format!("Failed to create Redis pool: {e}")))?;
        Ok(Self::new(Arc::new(pool)))
    }

    async fn get_conn(&self) -> EstateResult<deadpool_redis::Connection> {
        self.pool
            .get()
            .await
            .map_err(|e| EstateError::Cache(format!("Failed to get Redis connection: {e}")))
    }

    async fn try_partition(&self, keys: &[String]) -> EstateResult<CachePartition<String>> {
        let mut conn = self.get_conn().await?;
        // MGET always answers with a list, even for a single key.
        let values: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await
            .map_err(|e| EstateError::Cache(format!("Failed to read {} keys: {e}", keys.len())))?;

        let mut partition = CachePartition::default();
        for (key, value) in keys.iter().zip(values) {
            match value {
                Some(json) => {
                    partition.hits.insert(key.clone(), json);
                }
                None => {
                    partition.misses.insert(key.clone());
                }
            }
        }
        Ok(partition)
    }

    async fn try_absorb(&self, entries: &[(String, String)], ttl_secs: u64) -> EstateResult<()> {
        let mut conn = self.get_conn().await?;
        let mut pipe = redis::pipe();
        for (key, value) in entries {
            pipe.cmd("SET").arg(key).arg(value).arg("EX").arg(ttl_secs).ignore();
        }
        let (): () = pipe
            .query_async(&mut conn)
            .await
            .map_err(|e| EstateError::Cache(format!("Failed to write {} keys: {e}", entries.len())))?;
        Ok(())
    }

    /// Splits `keys` into hits and misses; on error every key misses.
    pub async fn partition(&self, keys: &[String]) -> CachePartition<String> {
        if keys.is_empty() {
            return CachePartition::default();
        }
        match self.try_partition(keys).await {
            Ok(partition) => partition,
            Err(e) => {
                warn!(error = %e, "Redis read failed, treating as cache miss");
                CachePartition::all_missing(keys)
            }
        }
    }

    /// Writes every entry with `ttl`; on error the write is dropped.
    pub async fn absorb(&self, entries: Vec<(String, String)>, ttl: Duration) {
        if entries.is_empty() {
            return;
        }
        let ttl_secs = ttl.as_secs().max(1);
        match self.try_absorb(&entries, ttl_secs).await {
            Ok(()) => debug!(keys = entries.len(), ttl_secs, "Cached entries in Redis"),
            Err(e) => warn!(error = %e, "Redis write failed, skipping cache fill"),
        }
    }
}

impl std::fmt::Debug for RedisCacheStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let status = self.pool.status();
        f.debug_struct("RedisCacheStore")
            .field("size", &status.size)
            .field("available", &status.available)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_connect_rejects_malformed_url() {
        assert!(RedisCacheStore::connect("not a url", 4).is_err());
    }

    #[tokio::test]
    async fn test_unreachable_server_degrades_to_misses() {
        // Nothing listens on port 1; connection errors must not escape.
        let store = RedisCacheStore::connect("redis://127.0.0.1:1", 1).unwrap();
        let keys = vec!["estate:cache:owner:a".to_string()];

        let partition = store.partition(&keys).await;
        assert!(partition.hits.is_empty());
        assert_eq!(partition.misses.len(), 1);

        store
            .absorb(vec![(keys[0].clone(), "{}".to_string())], Duration::from_secs(5))
            .await;
    }
}
