//! Search filter for property queries.

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::validation::rules;

/// Flat filter applied by the store when searching properties.
///
/// Name and address match as case-insensitive substrings, price bounds are
/// inclusive, and all supplied criteria combine with AND. Blank text filters
/// are treated as absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_price_bounds"))]
pub struct PropertyFilter {
    pub name: Option<String>,

    pub address: Option<String>,

    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub min_price: Option<f64>,

    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub max_price: Option<f64>,
}

fn validate_price_bounds(filter: &PropertyFilter) -> Result<(), ValidationError> {
    rules::price_range(filter.min_price, filter.max_price)
}

impl PropertyFilter {
    /// Creates a filter on the property name only.
    #[must_use]
    pub fn by_name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    /// Returns the trimmed name criterion, or `None` when absent or blank.
    #[must_use]
    pub fn name_term(&self) -> Option<&str> {
        non_blank(self.name.as_deref())
    }

    /// Returns the trimmed address criterion, or `None` when absent or blank.
    #[must_use]
    pub fn address_term(&self) -> Option<&str> {
        non_blank(self.address.as_deref())
    }

    /// Returns true if no criterion would restrict the result.
    #[must_use]
    pub fn is_unrestricted(&self) -> bool {
        self.name_term().is_none()
            && self.address_term().is_none()
            && self.min_price.is_none()
            && self.max_price.is_none()
    }

    /// Checks a property against every supplied criterion.
    #[must_use]
    pub fn matches(&self, name: &str, address: &str, price: f64) -> bool {
        let contains = |haystack: &str, needle: &str| {
            haystack.to_lowercase().contains(&needle.to_lowercase())
        };

        self.name_term().map_or(true, |term| contains(name, term))
            && self.address_term().map_or(true, |term| contains(address, term))
            && self.min_price.map_or(true, |min| price >= min)
            && self.max_price.map_or(true, |max| price <= max)
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
