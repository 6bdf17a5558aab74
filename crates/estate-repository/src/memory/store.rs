//! Process-local listing store.

use estate_core::{
    Owner, PageRequest, PagedResult, Property, PropertyFilter, PropertyImage, PropertyTrace,
};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashSet};

#[derive(Debug, Default)]
struct Collections {
    properties: BTreeMap<String, Property>,
    owners: BTreeMap<String, Owner>,
    images: BTreeMap<String, PropertyImage>,
    traces: BTreeMap<String, PropertyTrace>,
}

/// In-memory collections keyed by storage id.
///
/// Iteration follows storage-id order, which is also the order every query
/// returns. Writes replace a record with the same storage id.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    data: RwLock<Collections>,
}

impl InMemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_property(&self, property: Property) {
        self.data
            .write()
            .properties
            .insert(property.id.clone(), property);
    }

    pub fn insert_owner(&self, owner: Owner) {
        self.data.write().owners.insert(owner.id.clone(), owner);
    }

    pub fn insert_image(&self, image: PropertyImage) {
        self.data.write().images.insert(image.id.clone(), image);
    }

    pub fn insert_trace(&self, trace: PropertyTrace) {
        self.data.write().traces.insert(trace.id.clone(), trace);
    }

    /// Number of stored properties.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.data.read().properties.len()
    }

    /// Returns true if no collection holds any record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        let data = self.data.read();
        data.properties.is_empty()
            && data.owners.is_empty()
            && data.images.is_empty()
            && data.traces.is_empty()
    }

    /// Pages through the properties accepted by `filter`.
    #[must_use]
    pub fn page_properties(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> PagedResult<Property> {
        let data = self.data.read();
        let matching: Vec<&Property> = data
            .properties
            .values()
            .filter(|p| filter.matches(&p.name, &p.address, p.price))
            .collect();

        let total = matching.len() as u64;
        let items = matching
            .into_iter()
            .skip(usize::try_from(page.offset()).unwrap_or(usize::MAX))
            .take(usize::try_from(page.limit()).unwrap_or(usize::MAX))
            .cloned()
            .collect();

        PagedResult::new(items, total, page)
    }

    /// Finds a property by storage id, then by domain id.
    #[must_use]
    pub fn find_property(&self, id: &str) -> Option<Property> {
        let data = self.data.read();
        data.properties.get(id).cloned().or_else(|| {
            data.properties
                .values()
                .find(|p| !p.domain_id.is_empty() && p.domain_id == id)
                .cloned()
        })
    }

    /// Owners whose storage id or domain id is in `keys`.
    #[must_use]
    pub fn owners_matching(&self, keys: &HashSet<&str>) -> Vec<Owner> {
        self.data
            .read()
            .owners
            .values()
            .filter(|o| keys.contains(o.id.as_str()) || keys.contains(o.domain_id.as_str()))
            .cloned()
            .collect()
    }

    /// Enabled images whose property key is in `keys`, in storage-id order.
    #[must_use]
    pub fn enabled_images_for(&self, keys: &HashSet<&str>) -> Vec<PropertyImage> {
        self.data
            .read()
            .images
            .values()
            .filter(|i| i.enabled && keys.contains(i.property_key.as_str()))
            .cloned()
            .collect()
    }

    /// Traces whose property key is in `keys`, in storage-id order.
    #[must_use]
    pub fn traces_for(&self, keys: &HashSet<&str>) -> Vec<PropertyTrace> {
        self.data
            .read()
            .traces
            .values()
            .filter(|t| keys.contains(t.property_key.as_str()))
            .cloned()
            .collect()
    }
}
