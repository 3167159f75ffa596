//! Fixed-size pagination over a derived view

use crate::error::QueryError;
use serde::{Deserialize, Serialize};

/// Default rows per page on admin screens
pub const DEFAULT_PAGE_SIZE: usize = 10;

/// Requested page
///
/// Pages are 1-based, matching what screens display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page number
    pub page: usize,
    /// Rows per page
    pub page_size: usize,
}

impl Pagination {
    /// Create pagination
    ///
    /// # Errors
    /// Returns `QueryError::ZeroPageSize` if `page_size` is zero
    pub fn new(page: usize, page_size: usize) -> Result<Self, QueryError> {
        if page_size == 0 {
            return Err(QueryError::ZeroPageSize);
        }
        Ok(Self {
            page: page.max(1),
            page_size,
        })
    }

    /// Number of pages for `total` rows; an empty view still has one page
    #[inline]
    #[must_use]
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size).max(1)
    }

    /// Resolve against a view of `total` rows
    ///
    /// Page numbers past the end clamp to the last page.
    #[must_use]
    pub fn bounds(&self, total: usize) -> PageBounds {
        let page_count = self.page_count(total);
        let page = self.page.clamp(1, page_count);
        let start = ((page - 1) * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        PageBounds {
            page,
            page_count,
            start,
            end,
            total,
        }
    }

    /// Slice a derived view to this page
    #[must_use]
    pub fn slice<'a, T>(&self, view: &'a [T]) -> &'a [T] {
        let bounds = self.bounds(view.len());
        &view[bounds.start..bounds.end]
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// Resolved page position
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PageBounds {
    /// 1-based page actually shown
    pub page: usize,
    /// Total pages, at least one
    pub page_count: usize,
    /// First row index (inclusive)
    pub start: usize,
    /// Last row index (exclusive)
    pub end: usize,
    /// Rows in the derived view
    pub total: usize,
}

impl PageBounds {
    /// Check if a next page exists
    #[inline]
    #[must_use]
    pub fn has_next(&self) -> bool {
        self.page < self.page_count
    }

    /// Check if a previous page exists
    #[inline]
    #[must_use]
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    /// Rows on this page
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Check if this page is empty
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn last_page_may_be_short() {
        let p = Pagination::new(3, 10).unwrap();
        let bounds = p.bounds(25);
        assert_eq!(bounds.page_count, 3);
        assert_eq!((bounds.start, bounds.end), (20, 25));
        assert_eq!(bounds.len(), 5);
        assert!(!bounds.has_next());
        assert!(bounds.has_previous());
    }

    #[test]
    fn page_past_end_clamps() {
        let p = Pagination::new(9, 10).unwrap();
        let bounds = p.bounds(15);
        assert_eq!(bounds.page, 2);
        assert_eq!((bounds.start, bounds.end), (10, 15));
    }

    #[test]
    fn empty_view_has_one_empty_page() {
        let bounds = Pagination::default().bounds(0);
        assert_eq!(bounds.page_count, 1);
        assert!(bounds.is_empty());
        assert!(!bounds.has_next());
    }

    #[test]
    fn zero_page_size_rejected() {
        assert_eq!(Pagination::new(1, 0), Err(QueryError::ZeroPageSize));
    }

    #[test]
    fn page_zero_means_first() {
        let p = Pagination::new(0, 2).unwrap();
        assert_eq!(p.slice(&[1, 2, 3]), &[1, 2]);
    }
}
