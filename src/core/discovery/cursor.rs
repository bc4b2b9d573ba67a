//! Page cursor tracking
//!
//! Decides whether another page must be fetched. The cursor itself is never
//! stored here; it travels in the request/response payload.

use serde::{Deserialize, Serialize};

/// Paging state of one invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageCursor {
    /// 1-based page index
    pub page: u64,

    /// Page size
    pub limit: u64,

    /// Total matching records reported by the catalog
    pub hits: u64,
}

impl PageCursor {
    /// Create a cursor for the current page
    pub fn new(page: u64, limit: u64, hits: u64) -> Self {
        Self { page, limit, hits }
    }

    /// Next page index given how many records the current page returned
    pub fn next(&self, returned_count: usize) -> Option<u64> {
        next_cursor(self.page, self.limit, self.hits, returned_count)
    }
}

/// Next page index, or `None` once paging is exhausted
///
/// Advances iff the current page returned at least one record and
/// `hits > limit * page`. A short page still advances when the hit count
/// says more remain; an empty page always stops, even if the hit count is
/// stale.
///
/// # Examples
///
/// ```
/// use granule_discovery::core::discovery::cursor::next_cursor;
///
/// assert_eq!(next_cursor(1, 100, 250, 100), Some(2));
/// assert_eq!(next_cursor(3, 100, 250, 50), None);
/// assert_eq!(next_cursor(1, 100, 250, 0), None);
/// ```
pub fn next_cursor(page: u64, limit: u64, hits: u64, returned_count: usize) -> Option<u64> {
    if returned_count > 0 && hits > limit.saturating_mul(page) {
        page.checked_add(1)
    } else {
        None
    }
}
