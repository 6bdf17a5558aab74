//! Repository implementations over [`InMemoryStore`].

use super::InMemoryStore;
use crate::traits::{
    record_batch, OwnerRepository, PropertyImageRepository, PropertyRepository,
    PropertyTraceRepository,
};
use async_trait::async_trait;
use estate_core::{
    identity::{is_usable_key, resolve_requested},
    EstateResult, Owner, PageRequest, PagedResult, Property, PropertyFilter, PropertyImage,
    PropertyTrace,
};
use shaku::Component;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::debug;

fn key_set(keys: &[String]) -> HashSet<&str> {
    keys.iter()
        .map(String::as_str)
        .filter(|k| is_usable_key(k))
        .collect()
}

/// In-memory property repository.
#[derive(Component, Clone)]
#[shaku(interface = PropertyRepository)]
pub struct InMemoryPropertyRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPropertyRepository {
    /// Creates a repository over a shared store.
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PropertyRepository for InMemoryPropertyRepository {
    async fn get_paged(&self, page: PageRequest) -> EstateResult<PagedResult<Property>> {
        debug!("Paging properties, page: {}, size: {}", page.page, page.size);
        Ok(self.store.page_properties(&PropertyFilter::default(), page))
    }

    async fn search_paged(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> EstateResult<PagedResult<Property>> {
        debug!(?filter, "Searching properties, page: {}, size: {}", page.page, page.size);
        Ok(self.store.page_properties(filter, page))
    }

    async fn find_by_id(&self, id: &str) -> EstateResult<Option<Property>> {
        if !is_usable_key(id) {
            return Ok(None);
        }
        Ok(self.store.find_property(id))
    }
}

/// In-memory owner repository.
#[derive(Component, Clone)]
#[shaku(interface = OwnerRepository)]
pub struct InMemoryOwnerRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryOwnerRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl OwnerRepository for InMemoryOwnerRepository {
    async fn get_owners_by_keys(&self, keys: &[String]) -> EstateResult<HashMap<String, Owner>> {
        let wanted = key_set(keys);
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("owner", wanted.len());

        let candidates = self.store.owners_matching(&wanted);
        Ok(resolve_requested(wanted.iter().copied(), &candidates))
    }
}

/// In-memory property image repository.
#[derive(Component, Clone)]
#[shaku(interface = PropertyImageRepository)]
pub struct InMemoryPropertyImageRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPropertyImageRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PropertyImageRepository for InMemoryPropertyImageRepository {
    async fn get_first_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, PropertyImage>> {
        let wanted = key_set(keys);
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("first_image", wanted.len());

        let mut first = HashMap::new();
        // Storage-id order, so the first image seen per key is the lowest id.
        for image in self.store.enabled_images_for(&wanted) {
            first.entry(image.property_key.clone()).or_insert(image);
        }
        Ok(first)
    }

    async fn get_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyImage>>> {
        let wanted = key_set(keys);
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("images", wanted.len());

        let mut grouped: HashMap<String, Vec<PropertyImage>> = HashMap::new();
        for image in self.store.enabled_images_for(&wanted) {
            grouped
                .entry(image.property_key.clone())
                .or_default()
                .push(image);
        }
        Ok(grouped)
    }
}

/// In-memory property trace repository.
#[derive(Component, Clone)]
#[shaku(interface = PropertyTraceRepository)]
pub struct InMemoryPropertyTraceRepository {
    store: Arc<InMemoryStore>,
}

impl InMemoryPropertyTraceRepository {
    #[must_use]
    pub fn new(store: Arc<InMemoryStore>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl PropertyTraceRepository for InMemoryPropertyTraceRepository {
    async fn get_traces_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyTrace>>> {
        let wanted = key_set(keys);
        if wanted.is_empty() {
            return Ok(HashMap::new());
        }
        record_batch("traces", wanted.len());

        let mut grouped: HashMap<String, Vec<PropertyTrace>> = HashMap::new();
        for trace in self.store.traces_for(&wanted) {
            grouped
                .entry(trace.property_key.clone())
                .or_default()
                .push(trace);
        }
        for traces in grouped.values_mut() {
            traces.sort_by_key(|t| t.sale_date);
        }
        Ok(grouped)
    }
}
