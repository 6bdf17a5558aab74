//! Listing DTOs.

use chrono::{DateTime, NaiveDate, Utc};
use estate_core::PagedResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Property as shown in a listing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropertyDto {
    /// Storage id of the property.
    pub id_property: String,
    /// Owner reference as stored on the property.
    pub id_owner: String,
    pub name: String,
    pub address: String,
    pub price: f64,
    /// File of the first enabled image.
    pub image: Option<String>,
    pub owner_name: Option<String>,
}

/// Property owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OwnerDto {
    /// Storage id of the owner.
    pub id_owner: String,
    pub name: String,
    pub address: String,
    pub photo: String,
    pub birthday: NaiveDate,
}

/// One entry of a property's sale history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropertyTraceDto {
    pub id_property_trace: String,
    pub date_sale: DateTime<Utc>,
    pub name: String,
    pub value: f64,
    pub tax: f64,
}

/// Property with owner, images and sale history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PropertyDetailDto {
    pub id_property: String,
    pub id_owner: String,
    pub name: String,
    pub address: String,
    pub price: f64,
    pub code_internal: String,
    pub year: i32,
    /// Files of the enabled images.
    pub images: Vec<String>,
    pub owner: Option<OwnerDto>,
    /// Oldest sale first.
    pub traces: Vec<PropertyTraceDto>,
}

/// A page of listings.
pub type PropertyPage = PagedResult<PropertyDto>;
