//! Property service trait definition.

use crate::dto::{PropertyDetailDto, PropertyPage};
use estate_core::{EstateResult, Interface, PageRequest, PropertyFilter};
use async_trait::async_trait;

/// Read side of the listings: pages, searches and details with their
/// related records resolved.
///
/// Callers pass an already normalized [`PageRequest`].
#[async_trait]
pub trait PropertyService: Interface + Send + Sync {
    /// Lists all properties.
    async fn get_page(&self, page: PageRequest) -> EstateResult<PropertyPage>;

    /// Lists the properties matching `filter`.
    async fn search(&self, filter: PropertyFilter, page: PageRequest) -> EstateResult<PropertyPage>;

    /// Gets a property by storage id or domain id.
    async fn get_detail(&self, id: &str) -> EstateResult<Option<PropertyDetailDto>>;

    /// Gets the first enabled image file of a property.
    async fn get_property_image(&self, id: &str) -> EstateResult<Option<String>>;
}
