//! Pagination types for list operations.
//!
//! Pages are 1-based. Normalizing untrusted input happens once at the HTTP
//! boundary through [`PageRequest::normalize`]; everything below assumes a
//! valid request.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub size: u32,
}

impl PageRequest {
    /// The default page number.
    pub const DEFAULT_PAGE: u32 = 1;
    /// The default page size.
    pub const DEFAULT_SIZE: u32 = 20;
    /// The maximum allowed page size.
    pub const MAX_SIZE: u32 = 100;

    /// Creates a new page request, clamping the size to `MAX_SIZE`.
    #[must_use]
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page: page.max(1),
            size: size.clamp(1, Self::MAX_SIZE),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(Self::DEFAULT_PAGE, Self::DEFAULT_SIZE)
    }

    /// Builds a request from raw query values.
    ///
    /// Missing or non-positive values fall back to the defaults and oversized
    /// pages are capped at `max_size`.
    #[must_use]
    pub fn normalize(
        page: Option<i64>,
        size: Option<i64>,
        default_size: u32,
        max_size: u32,
    ) -> Self {
        let page = match page {
            Some(p) if p > 0 => u32::try_from(p).unwrap_or(u32::MAX),
            _ => Self::DEFAULT_PAGE,
        };
        let size = match size {
            Some(s) if s > 0 => u32::try_from(s).unwrap_or(u32::MAX).min(max_size),
            _ => default_size.min(max_size),
        };
        Self {
            page,
            size: size.max(1),
        }
    }

    /// Returns the offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> u64 {
        (self.page.saturating_sub(1) as u64) * self.size as u64
    }

    /// Returns the limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> u64 {
        self.size as u64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// A page of results together with the total the store reported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PagedResult<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Total number of matching items across all pages.
    pub total: u64,
    /// The current page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub page_size: u32,
    /// `ceil(total / page_size)`.
    pub total_pages: u64,
}

impl<T> PagedResult<T> {
    /// Creates a new paged result.
    #[must_use]
    pub fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        let total_pages = if request.size > 0 {
            total.div_ceil(u64::from(request.size))
        } else {
            0
        };

        Self {
            items,
            total,
            page: request.page,
            page_size: request.size,
            total_pages,
        }
    }

    /// Creates an empty page.
    #[must_use]
    pub fn empty(request: PageRequest) -> Self {
        Self::new(Vec::new(), 0, request)
    }

    /// Maps the page content to a different type, keeping the paging data.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> PagedResult<U> {
        PagedResult {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            page_size: self.page_size,
            total_pages: self.total_pages,
        }
    }

    /// Returns true if the page is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of items on this page.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if there is a next page.
    #[must_use]
    pub fn has_next(&self) -> bool {
        u64::from(self.page) < self.total_pages
    }

    /// Returns true if there is a previous page.
    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.page > 1
    }
}

impl<T> IntoIterator for PagedResult<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_offset() {
        let req = PageRequest::new(3, 10);
        assert_eq!(req.offset(), 20);
        assert_eq!(req.limit(), 10);

        assert_eq!(PageRequest::first().offset(), 0);
    }

    #[test]
    fn test_page_request_max_size() {
        let req = PageRequest::new(1, 1000);
        assert_eq!(req.size, PageRequest::MAX_SIZE);
    }

    #[test]
    fn test_normalize_defaults() {
        let req = PageRequest::normalize(None, None, 20, 100);
        assert_eq!(req, PageRequest { page: 1, size: 20 });
    }

    #[test]
    fn test_normalize_non_positive_values() {
        let req = PageRequest::normalize(Some(0), Some(-5), 20, 100);
        assert_eq!(req, PageRequest { page: 1, size: 20 });

        let req = PageRequest::normalize(Some(-3), Some(0), 20, 100);
        assert_eq!(req, PageRequest { page: 1, size: 20 });
    }

    #[test]
    fn test_normalize_caps_size() {
        let req = PageRequest::normalize(Some(4), Some(500), 20, 100);
        assert_eq!(req, PageRequest { page: 4, size: 100 });
    }

    #[test]
    fn test_paged_result_total_pages() {
        let page: PagedResult<i32> = PagedResult::new(vec![1], 11, PageRequest::new(1, 5));
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next());
        assert!(!page.has_previous());
    }

    #[test]
    fn test_paged_result_last_page() {
        let page: PagedResult<i32> = PagedResult::new(vec![1, 2], 22, PageRequest::new(3, 10));
        assert!(!page.has_next());
        assert!(page.has_previous());
    }

    #[test]
    fn test_paged_result_map() {
        let page = PagedResult::new(vec![1, 2, 3], 3, PageRequest::new(1, 10));
        let mapped = page.map(|x| x * 2);
        assert_eq!(mapped.items, vec![2, 4, 6]);
        assert_eq!(mapped.total, 3);
        assert_eq!(mapped.total_pages, 1);
    }

    #[test]
    fn test_paged_result_empty() {
        let page: PagedResult<i32> = PagedResult::empty(PageRequest::first());
        assert!(page.is_empty());
        assert_eq!(page.len(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next());
    }
}
