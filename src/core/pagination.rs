//! Pagination parameters and normalisation for list queries.

use serde::{Deserialize, Serialize};

/// Page size used when none (or zero) is requested
pub const DEFAULT_PAGE_SIZE: u64 = 10;
/// Upper bound on page size
pub const MAX_PAGE_SIZE: u64 = 100;
/// Largest row offset storage accepts (a signed 64-bit bind parameter)
pub const MAX_OFFSET: u64 = i64::MAX.unsigned_abs();

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// Items per page
    pub page_size: u64,
}

impl Pagination {
    /// Builds pagination from optional request values.
    #[must_use]
    pub fn new(page: Option<u64>, page_size: Option<u64>) -> Self {
        let defaults = Self::default();
        Self {
            page: page.unwrap_or(defaults.page),
            page_size: page_size.unwrap_or(defaults.page_size),
        }
    }

    /// Clamps to sane bounds: page 0 becomes 1, page size 0 becomes the default
    /// and anything above [`MAX_PAGE_SIZE`] is capped.
    #[must_use]
    pub fn normalize(self) -> Self {
        let page = self.page.max(1);
        let page_size = match self.page_size {
            0 => DEFAULT_PAGE_SIZE,
            n => n.min(MAX_PAGE_SIZE),
        };
        Self { page, page_size }
    }

    /// Rows to skip: `(page - 1) * page_size`, capped at [`MAX_OFFSET`].
    #[must_use]
    pub const fn offset(self) -> u64 {
        let offset = self.page.saturating_sub(1).saturating_mul(self.page_size);
        if offset > MAX_OFFSET { MAX_OFFSET } else { offset }
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
