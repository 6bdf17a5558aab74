//! Lookaside cache interface.

use super::cache_keys;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use shaku::Interface;
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::{debug, warn};

/// Result of splitting requested keys into cached and missing ones.
#[derive(Debug, Clone, PartialEq)]
pub struct CachePartition<V> {
    /// Keys with a live entry, with their values.
    pub hits: HashMap<String, V>,
    /// Keys with no live entry.
    pub misses: BTreeSet<String>,
}

impl<V> CachePartition<V> {
    /// A partition where every key missed.
    #[must_use]
    pub fn all_missing<'k>(keys: impl IntoIterator<Item = &'k String>) -> Self {
        Self {
            hits: HashMap::new(),
            misses: keys.into_iter().cloned().collect(),
        }
    }

    /// Returns true if every requested key was found.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.misses.is_empty()
    }
}

impl<V> Default for CachePartition<V> {
    fn default() -> Self {
        Self {
            hits: HashMap::new(),
            misses: BTreeSet::new(),
        }
    }
}

/// Cache consulted before a store read and filled after it.
///
/// Values travel as JSON strings so the trait stays object safe. Operations
/// never fail: a backend error is logged and reads as a miss.
#[async_trait]
pub trait LookasideCache: Interface + Send + Sync {
    /// Splits `keys` into hits and misses. An expired entry is a miss.
    async fn partition_raw(&self, keys: &[String]) -> CachePartition<String>;

    /// Stores every entry with `ttl`, overwriting what was there.
    async fn absorb_raw(&self, entries: Vec<(String, String)>, ttl: Duration);

    /// Returns false when the cache stores nothing.
    fn is_enabled(&self) -> bool;
}

/// Typed, namespaced access on top of [`LookasideCache`].
///
/// Callers pass logical keys; the namespace prefix is added on the way in
/// and stripped on the way out.
#[async_trait]
pub trait LookasideCacheExt: LookasideCache {
    /// Typed [`LookasideCache::partition_raw`]. Undecodable entries count as misses.
    async fn partition<V: DeserializeOwned + Send>(
        &self,
        namespace: &'static str,
        keys: &[String],
    ) -> CachePartition<V> {
        if keys.is_empty() {
            return CachePartition::default();
        }
        if !self.is_enabled() {
            record_lookups(namespace, 0, keys.len());
            return CachePartition::all_missing(keys);
        }

        let full_keys: Vec<String> = keys
            .iter()
            .map(|key| cache_keys::entry(namespace, key))
            .collect();
        let raw = self.partition_raw(&full_keys).await;

        let mut partition = CachePartition::default();
        for (key, full_key) in keys.iter().zip(&full_keys) {
            match raw.hits.get(full_key).map(|json| serde_json::from_str::<V>(json)) {
                Some(Ok(value)) => {
                    partition.hits.insert(key.clone(), value);
                }
                Some(Err(e)) => {
                    warn!(key = %full_key, error = %e, "Discarding undecodable cache entry");
                    partition.misses.insert(key.clone());
                }
                None => {
                    partition.misses.insert(key.clone());
                }
            }
        }

        record_lookups(namespace, partition.hits.len(), partition.misses.len());
        debug!(
            namespace,
            hits = partition.hits.len(),
            misses = partition.misses.len(),
            "Cache partition"
        );
        partition
    }

    /// Typed [`LookasideCache::absorb_raw`].
    async fn absorb<V: Serialize + Sync>(
        &self,
        namespace: &'static str,
        entries: &HashMap<String, V>,
        ttl: Duration,
    ) {
        if entries.is_empty() || !self.is_enabled() {
            return;
        }

        let encoded: Vec<(String, String)> = entries
            .iter()
            .filter_map(|(key, value)| match serde_json::to_string(value) {
                Ok(json) => Some((cache_keys::entry(namespace, key), json)),
                Err(e) => {
                    warn!(key = %key, error = %e, "Skipping unencodable cache entry");
                    None
                }
            })
            .collect();
        self.absorb_raw(encoded, ttl).await;
    }

    /// Reads a single entry.
    async fn get<V: DeserializeOwned + Send>(&self, namespace: &'static str, key: &str) -> Option<V> {
        let key = key.to_string();
        self.partition::<V>(namespace, std::slice::from_ref(&key))
            .await
            .hits
            .remove(&key)
    }

    /// Writes a single entry.
    async fn put<V: Serialize + Sync>(
        &self,
        namespace: &'static str,
        key: &str,
        value: &V,
        ttl: Duration,
    ) {
        if !self.is_enabled() {
            return;
        }
        match serde_json::to_string(value) {
            Ok(json) => {
                self.absorb_raw(vec![(cache_keys::entry(namespace, key), json)], ttl)
                    .await;
            }
            Err(e) => warn!(key, error = %e, "Skipping unencodable cache entry"),
        }
    }
}

impl<T: LookasideCache + ?Sized> LookasideCacheExt for T {}

fn record_lookups(namespace: &'static str, hits: usize, misses: usize) {
    if hits > 0 {
        metrics::counter!("estate_cache_hits_total", "namespace" => namespace)
            .increment(hits as u64);
    }
    if misses > 0 {
        metrics::counter!("estate_cache_misses_total", "namespace" => namespace)
            .increment(misses as u64);
    }
}
