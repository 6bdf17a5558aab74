//! Repository trait definitions.
//!
//! Every batch method issues exactly one store request per call and none
//! when the key set is empty. Keys may be storage ids or domain ids.

use estate_core::{
    EstateResult, Interface, Owner, PageRequest, PagedResult, Property, PropertyFilter,
    PropertyImage, PropertyTrace,
};
use async_trait::async_trait;
use std::collections::HashMap;

/// Property repository trait.
#[async_trait]
pub trait PropertyRepository: Interface + Send + Sync {
    /// Returns one page of all properties, ordered by storage id.
    async fn get_paged(&self, page: PageRequest) -> EstateResult<PagedResult<Property>>;

    /// Returns one page of the properties matching `filter`.
    async fn search_paged(
        &self,
        filter: &PropertyFilter,
        page: PageRequest,
    ) -> EstateResult<PagedResult<Property>>;

    /// Finds a property by storage id, falling back to the domain id.
    async fn find_by_id(&self, id: &str) -> EstateResult<Option<Property>>;
}

/// Owner repository trait.
#[async_trait]
pub trait OwnerRepository: Interface + Send + Sync {
    /// Resolves owners by storage id or domain id.
    ///
    /// Every requested key that identifies an owner gets its own entry, so
    /// two keys naming the same owner map to equal values.
    async fn get_owners_by_keys(&self, keys: &[String]) -> EstateResult<HashMap<String, Owner>>;
}

/// Property image repository trait.
#[async_trait]
pub trait PropertyImageRepository: Interface + Send + Sync {
    /// Returns the first enabled image per property key.
    ///
    /// "First" is the enabled image with the lowest storage id.
    async fn get_first_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, PropertyImage>>;

    /// Returns every enabled image per property key, ordered by storage id.
    async fn get_enabled_images_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyImage>>>;
}

/// Property trace repository trait.
#[async_trait]
pub trait PropertyTraceRepository: Interface + Send + Sync {
    /// Returns the sale history per property key, oldest sale first.
    async fn get_traces_by_property_keys(
        &self,
        keys: &[String],
    ) -> EstateResult<HashMap<String, Vec<PropertyTrace>>>;
}

/// Records one batched store request.
pub(crate) fn record_batch(entity: &'static str, keys: usize) {
    metrics::counter!("estate_store_batch_requests_total", "entity" => entity).increment(1);
    tracing::debug!(entity, keys, "Batched store request");
}
