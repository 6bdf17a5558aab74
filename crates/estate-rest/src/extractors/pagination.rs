//! Paging and search query parameters.

use estate_config::ApiConfig;
use estate_core::{rules, PageRequest, PropertyFilter};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

/// Query parameters for pagination.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationQuery {
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Items per page.
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

impl PaginationQuery {
    /// Applies the configured defaults and caps.
    #[must_use]
    pub fn to_page_request(&self, api: &ApiConfig) -> PageRequest {
        normalize_page(self.page, self.page_size, api)
    }
}

/// Query parameters for property search.
#[derive(Debug, Clone, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
#[validate(schema(function = "validate_search_bounds"))]
pub struct SearchQuery {
    /// Case-insensitive substring of the property name.
    pub name: Option<String>,
    /// Case-insensitive substring of the address.
    pub address: Option<String>,
    /// Lowest price, inclusive.
    #[serde(alias = "minPrice")]
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub min_price: Option<f64>,
    /// Highest price, inclusive.
    #[serde(alias = "maxPrice")]
    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub max_price: Option<f64>,
    /// Page number, starting at 1.
    pub page: Option<i64>,
    /// Items per page.
    #[serde(alias = "pageSize")]
    pub page_size: Option<i64>,
}

fn validate_search_bounds(query: &SearchQuery) -> Result<(), ValidationError> {
    rules::price_range(query.min_price, query.max_price)
}

impl SearchQuery {
    /// Applies the configured defaults and caps.
    #[must_use]
    pub fn to_page_request(&self, api: &ApiConfig) -> PageRequest {
        normalize_page(self.page, self.page_size, api)
    }

    /// Splits off the filter criteria.
    #[must_use]
    pub fn filter(&self) -> PropertyFilter {
        PropertyFilter {
            name: self.name.clone(),
            address: self.address.clone(),
            min_price: self.min_price,
            max_price: self.max_price,
        }
    }
}

fn normalize_page(page: Option<i64>, page_size: Option<i64>, api: &ApiConfig) -> PageRequest {
    let page = page
        .filter(|p| *p > 0)
        .or(Some(i64::from(api.default_page)));
    PageRequest::normalize(page, page_size, api.default_page_size, api.max_page_size)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn query(page: Option<i64>, page_size: Option<i64>) -> PaginationQuery {
        PaginationQuery { page, page_size }
    }

    #[test]
    fn test_defaults_when_missing() {
        let page = query(None, None).to_page_request(&ApiConfig::default());
        assert_eq!(page, PageRequest::new(1, 20));
    }

    #[test]
    fn test_non_positive_values_fall_back() {
        let api = ApiConfig::default();
        assert_eq!(query(Some(0), Some(0)).to_page_request(&api), PageRequest::new(1, 20));
        assert_eq!(query(Some(-3), Some(-1)).to_page_request(&api), PageRequest::new(1, 20));
    }

    #[test]
    fn test_page_size_capped() {
        let page = query(Some(3), Some(500)).to_page_request(&ApiConfig::default());
        assert_eq!(page, PageRequest::new(3, 100));
    }

    #[test]
    fn test_configured_defaults() {
        let api = ApiConfig {
            default_page: 2,
            default_page_size: 5,
            max_page_size: 10,
        };
        assert_eq!(query(None, None).to_page_request(&api), PageRequest::new(2, 5));
        assert_eq!(query(None, Some(50)).to_page_request(&api), PageRequest::new(2, 10));
    }

    #[test]
    fn test_search_bounds_validation() {
        let inverted = SearchQuery {
            min_price: Some(300.0),
            max_price: Some(100.0),
            ..SearchQuery::default()
        };
        assert!(inverted.validate().is_err());

        let negative = SearchQuery {
            min_price: Some(-1.0),
            ..SearchQuery::default()
        };
        let errors = negative.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("min_price"));

        let equal = SearchQuery {
            min_price: Some(100.0),
            max_price: Some(100.0),
            ..SearchQuery::default()
        };
        assert!(equal.validate().is_ok());
    }

    #[test]
    fn test_query_aliases() {
        let parsed: SearchQuery =
            serde_json::from_str(r#"{"name":"Casa","minPrice":10.0,"pageSize":5}"#).unwrap();
        assert_eq!(parsed.min_price, Some(10.0));
        assert_eq!(parsed.page_size, Some(5));
        assert_eq!(parsed.filter().name.as_deref(), Some("Casa"));
    }
}
