//! Batch loaders for related records.
//!
//! Each loader issues one store request per call for the keys the cache
//! could not answer. [`load_through_cache`] ties a loader to the lookaside
//! cache.

use crate::cache::{cache_keys, CachePartition, LookasideCache, LookasideCacheExt};
use async_trait::async_trait;
use estate_core::{identity, EstateResult, Owner, PropertyImage, PropertyTrace};
use estate_repository::{OwnerRepository, PropertyImageRepository, PropertyTraceRepository};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::time::Duration;
use tracing::debug;

/// Fetches many keyed values of one entity type in a single request.
#[async_trait]
pub trait BatchLoader: Send + Sync {
    /// Value stored per key.
    type Value: Serialize + DeserializeOwned + Clone + Send + Sync;

    /// Cache namespace for this loader's entries.
    const NAMESPACE: &'static str;

    /// Loads the values for `keys`. Keys with no value are absent.
    async fn load_many(&self, keys: &[String]) -> EstateResult<HashMap<String, Self::Value>>;

    /// Further keys a loaded value should be cached under.
    fn aliases(&self, _key: &str, _value: &Self::Value) -> Vec<String> {
        Vec::new()
    }
}

/// Resolves `keys` from the cache, loading and absorbing the misses.
///
/// Only values that were found are cached; absence is asked again next time.
pub async fn load_through_cache<L: BatchLoader>(
    loader: &L,
    cache: &dyn LookasideCache,
    keys: &BTreeSet<String>,
    ttl: Duration,
) -> EstateResult<HashMap<String, L::Value>> {
    if keys.is_empty() {
        return Ok(HashMap::new());
    }

    let requested: Vec<String> = keys.iter().cloned().collect();
    let CachePartition { mut hits, misses } = cache.partition::<L::Value>(L::NAMESPACE, &requested).await;
    if misses.is_empty() {
        return Ok(hits);
    }

    let missing: Vec<String> = misses.into_iter().collect();
    let loaded = loader.load_many(&missing).await?;
    debug!(
        namespace = L::NAMESPACE,
        requested = missing.len(),
        found = loaded.len(),
        "Loaded cache misses"
    );

    let mut fill: HashMap<String, L::Value> = HashMap::with_capacity(loaded.len());
    for (key, value) in &loaded {
        for alias in loader.aliases(key, value) {
            fill.entry(alias).or_insert_with(|| value.clone());
        }
        fill.insert(key.clone(), value.clone());
    }
    cache.absorb(L::NAMESPACE, &fill, ttl).await;

    hits.extend(loaded);
    Ok(hits)
}

/// Owners by storage id or domain id.
pub struct OwnerLoader<'a> {
    repository: &'a dyn OwnerRepository,
}

impl<'a> OwnerLoader<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn OwnerRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BatchLoader for OwnerLoader<'_> {
    type Value = Owner;
    const NAMESPACE: &'static str = cache_keys::OWNER;

    async fn load_many(&self, keys: &[String]) -> EstateResult<HashMap<String, Owner>> {
        self.repository.get_owners_by_keys(keys).await
    }

    /// An owner found by domain id is also cached under its storage id.
    ///
    /// The domain id is never added unrequested: another owner may hold it
    /// as a storage id, and that owner wins a lookup by that key.
    fn aliases(&self, _key: &str, value: &Owner) -> Vec<String> {
        if identity::is_usable_key(&value.id) {
            vec![value.id.clone()]
        } else {
            Vec::new()
        }
    }
}

/// First enabled image per property key.
pub struct FirstImageLoader<'a> {
    repository: &'a dyn PropertyImageRepository,
}

impl<'a> FirstImageLoader<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn PropertyImageRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BatchLoader for FirstImageLoader<'_> {
    type Value = PropertyImage;
    const NAMESPACE: &'static str = cache_keys::FIRST_IMAGE;

    async fn load_many(&self, keys: &[String]) -> EstateResult<HashMap<String, PropertyImage>> {
        self.repository
            .get_first_enabled_images_by_property_keys(keys)
            .await
    }
}

/// Every enabled image per property key.
pub struct ImageSetLoader<'a> {
    repository: &'a dyn PropertyImageRepository,
}

impl<'a> ImageSetLoader<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn PropertyImageRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BatchLoader for ImageSetLoader<'_> {
    type Value = Vec<PropertyImage>;
    const NAMESPACE: &'static str = cache_keys::IMAGES;

    async fn load_many(&self, keys: &[String]) -> EstateResult<HashMap<String, Vec<PropertyImage>>> {
        self.repository.get_enabled_images_by_property_keys(keys).await
    }
}

/// Sale history per property key, oldest first.
pub struct TraceLoader<'a> {
    repository: &'a dyn PropertyTraceRepository,
}

impl<'a> TraceLoader<'a> {
    #[must_use]
    pub fn new(repository: &'a dyn PropertyTraceRepository) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl BatchLoader for TraceLoader<'_> {
    type Value = Vec<PropertyTrace>;
    const NAMESPACE: &'static str = cache_keys::TRACES;

    async fn load_many(&self, keys: &[String]) -> EstateResult<HashMap<String, Vec<PropertyTrace>>> {
        self.repository.get_traces_by_property_keys(keys).await
    }
}
