//! Pagination envelope consumed by the list cache.

use serde::{Deserialize, Serialize};

/// Default page size used by the console's list views.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Pagination metadata as reported by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    /// 1-based page number.
    pub page: u32,
    /// Requested page size.
    pub limit: u32,
    /// Total items across all pages.
    pub total: u64,
    pub total_pages: u32,
}

impl PageMeta {
    /// Metadata for an empty, not-yet-fetched collection.
    pub fn empty(limit: u32) -> Self {
        Self {
            page: 1,
            limit,
            total: 0,
            total_pages: 0,
        }
    }

    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Re-derive `total_pages` from `total` and `limit` after a mutation.
    pub fn recompute_pages(&mut self) {
        self.total_pages = if self.limit == 0 {
            0
        } else {
            self.total.div_ceil(self.limit as u64) as u32
        };
    }
}

impl Default for PageMeta {
    fn default() -> Self {
        Self::empty(DEFAULT_PAGE_SIZE)
    }
}

/// One fetched page of a remote collection.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub meta: PageMeta,
}
