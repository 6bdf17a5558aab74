//! In-process cache store.

use super::CachePartition;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::time::Duration;
use tokio::time::Instant;

#[derive(Debug, Clone)]
struct CacheEntry {
    value: String,
    inserted_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        now.saturating_duration_since(self.inserted_at) < self.ttl
    }
}

/// Process-wide map of JSON values with per-entry expiry.
///
/// Expired entries are dropped lazily when a read runs into them; there is
/// no background sweep.
#[derive(Debug, Default)]
pub struct MemoryCacheStore {
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCacheStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits `keys` into live entries and misses.
    pub fn partition(&self, keys: &[String]) -> CachePartition<String> {
        let now = Instant::now();
        let mut partition = CachePartition::default();
        let mut expired = Vec::new();

        {
            let entries = self.entries.read();
            for key in keys {
                match entries.get(key) {
                    Some(entry) if entry.is_live(now) => {
                        partition.hits.insert(key.clone(), entry.value.clone());
                    }
                    Some(_) => {
                        expired.push(key.as_str());
                        partition.misses.insert(key.clone());
                    }
                    None => {
                        partition.misses.insert(key.clone());
                    }
                }
            }
        }

        if !expired.is_empty() {
            let mut entries = self.entries.write();
            for key in expired {
                // A concurrent absorb may have refreshed the entry meanwhile.
                if entries.get(key).is_some_and(|entry| !entry.is_live(now)) {
                    entries.remove(key);
                }
            }
        }

        partition
    }

    /// Inserts every entry, replacing existing ones.
    ///
    /// Expired entries are swept while the write lock is held, so keys that
    /// are never read again do not accumulate.
    pub fn absorb(&self, entries: Vec<(String, String)>, ttl: Duration) {
        let inserted_at = Instant::now();
        let mut map = self.entries.write();
        map.retain(|_, entry| entry.is_live(inserted_at));
        for (key, value) in entries {
            map.insert(
                key,
                CacheEntry {
                    value,
                    inserted_at,
                    ttl,
                },
            );
        }
    }

    /// Number of stored entries, including ones not yet swept.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if nothing is stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
