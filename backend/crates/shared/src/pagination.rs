//! Pagination
//!
//! Offset pagination used by every list endpoint.

use serde::Serialize;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;
/// 1 ページあたりの上限件数
pub const MAX_LIMIT: u32 = 100;

/// A validated page request.
///
/// ```
/// use kernel::pagination::PageRequest;
///
/// let req = PageRequest::new(Some(3), Some(20));
/// assert_eq!(req.offset(), 40);
///
/// let req = PageRequest::new(None, Some(5000));
/// assert_eq!(req.page(), 1);
/// assert_eq!(req.limit(), 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    limit: u32,
}

impl PageRequest {
    /// Page is at least 1, limit is clamped to `1..=MAX_LIMIT`
    pub fn new(page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.unwrap_or(DEFAULT_PAGE).max(1),
            limit: limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT),
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn limit(&self) -> u32 {
        self.limit
    }

    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.limit)
    }

    /// Describe the page for a result set of `total` rows
    pub fn paginate(&self, total: u64) -> Pagination {
        Pagination {
            page: self.page,
            limit: self.limit,
            total,
            pages: total.div_ceil(u64::from(self.limit)),
        }
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// Pagination block returned alongside list items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub pages: u64,
}

/// One page of items plus the total row count
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let req = PageRequest::default();
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 10);
        assert_eq!(req.offset(), 0);
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let req = PageRequest::new(Some(0), Some(0));
        assert_eq!(req.page(), 1);
        assert_eq!(req.limit(), 1);
    }

    #[test]
    fn test_pages_round_up() {
        let req = PageRequest::new(Some(1), Some(10));
        assert_eq!(req.paginate(0).pages, 0);
        assert_eq!(req.paginate(10).pages, 1);
        assert_eq!(req.paginate(11).pages, 2);
    }

    #[test]
    fn test_pagination_serializes_flat() {
        let json = serde_json::to_value(PageRequest::new(Some(2), Some(5)).paginate(12)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"page": 2, "limit": 5, "total": 12, "pages": 3})
        );
    }
}
