//! Cache key generators for consistent key naming.

use estate_core::{PageRequest, PropertyFilter};
use std::fmt::Write;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "estate:cache";

/// Owners, keyed by storage id or domain id.
pub const OWNER: &str = "owner";
/// First enabled image, keyed by property key.
pub const FIRST_IMAGE: &str = "first_image";
/// All enabled images, keyed by property key.
pub const IMAGES: &str = "images";
/// Sale history, keyed by property key.
pub const TRACES: &str = "traces";
/// Composed listing pages, keyed by [`page_query`] or [`search_query`].
pub const QUERY: &str = "query";

/// Renders a field the query did not set.
const ABSENT: &str = "~";

/// Full key for a logical key inside a namespace.
#[must_use]
pub fn entry(namespace: &str, key: &str) -> String {
    format!("{CACHE_PREFIX}:{namespace}:{key}")
}

/// Logical key of an unfiltered page.
#[must_use]
pub fn page_query(page: PageRequest) -> String {
    format!("page:{}:size:{}", page.page, page.size)
}

/// Logical key of a filtered page.
///
/// Fields appear in a fixed order. Text is trimmed, lowercased and quoted,
/// so an empty string renders as `''` and stays distinct from an absent one.
#[must_use]
pub fn search_query(filter: &PropertyFilter, page: PageRequest) -> String {
    let mut key = String::from("search");
    let _ = write!(key, ":name={}", text_part(filter.name.as_deref()));
    let _ = write!(key, ":addr={}", text_part(filter.address.as_deref()));
    let _ = write!(key, ":min={}", price_part(filter.min_price));
    let _ = write!(key, ":max={}", price_part(filter.max_price));
    let _ = write!(key, ":page={}:size={}", page.page, page.size);
    key
}

fn text_part(value: Option<&str>) -> String {
    match value {
        None => ABSENT.to_string(),
        Some(text) => {
            let normalized = text.trim().to_lowercase();
            let mut quoted = String::with_capacity(normalized.len() + 2);
            quoted.push('\'');
            for c in normalized.chars() {
                if c == '\'' || c == '\\' {
                    quoted.push('\\');
                }
                quoted.push(c);
            }
            quoted.push('\'');
            quoted
        }
    }
}

fn price_part(value: Option<f64>) -> String {
    // `-0.0 + 0.0` is `0.0`, so both zeros render as `0`.
    value.map_or_else(|| ABSENT.to_string(), |price| (price + 0.0).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_key() {
        assert_eq!(entry(OWNER, "OWNER001"), "estate:cache:owner:OWNER001");
        assert_eq!(entry(FIRST_IMAGE, "p-1"), "estate:cache:first_image:p-1");
    }

    #[test]
    fn test_page_query_key() {
        assert_eq!(page_query(PageRequest::new(2, 20)), "page:2:size:20");
    }

    #[test]
    fn test_search_query_key() {
        let filter = PropertyFilter {
            name: Some("  Casa ".to_string()),
            address: None,
            min_price: Some(100_000.0),
            max_price: None,
        };
        assert_eq!(
            search_query(&filter, PageRequest::new(1, 20)),
            "search:name='casa':addr=~:min=100000:max=~:page=1:size=20"
        );
    }

    #[test]
    fn test_search_query_is_case_insensitive() {
        let page = PageRequest::first();
        assert_eq!(
            search_query(&PropertyFilter::by_name("CASA"), page),
            search_query(&PropertyFilter::by_name("casa"), page)
        );
    }

    #[test]
    fn test_empty_text_differs_from_absent() {
        let page = PageRequest::first();
        let empty = PropertyFilter {
            name: Some(String::new()),
            ..PropertyFilter::default()
        };
        assert_ne!(
            search_query(&empty, page),
            search_query(&PropertyFilter::default(), page)
        );
    }

    #[test]
    fn test_quotes_are_escaped() {
        let page = PageRequest::first();
        let tricky = PropertyFilter {
            name: Some("a':addr='b".to_string()),
            ..PropertyFilter::default()
        };
        let plain = PropertyFilter {
            name: Some("a".to_string()),
            address: Some("b".to_string()),
            ..PropertyFilter::default()
        };
        assert_ne!(search_query(&tricky, page), search_query(&plain, page));
    }

    #[test]
    fn test_every_field_changes_key() {
        let page = PageRequest::first();
        let base = search_query(&PropertyFilter::default(), page);
        assert_ne!(base, search_query(&PropertyFilter::default(), PageRequest::new(2, 20)));
        assert_ne!(base, search_query(&PropertyFilter::default(), PageRequest::new(1, 10)));
        assert_ne!(
            base,
            search_query(
                &PropertyFilter {
                    max_price: Some(1.0),
                    ..PropertyFilter::default()
                },
                page
            )
        );
        assert_ne!(base, page_query(page));
    }

    #[test]
    fn test_negative_zero_price_matches_zero() {
        let page = PageRequest::first();
        let zero = PropertyFilter {
            min_price: Some(0.0),
            ..PropertyFilter::default()
        };
        let negative_zero = PropertyFilter {
            min_price: Some(-0.0),
            ..PropertyFilter::default()
        };
        assert_eq!(search_query(&zero, page), search_query(&negative_zero, page));
        assert!(search_query(&negative_zero, page).contains(":min=0:"));
    }
}
