//! Paging over grouped views
//!
//! Grouped panels page over groups, not records.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default number of groups per page
pub const GROUPS_PER_PAGE: usize = 5;

/// Requested page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PageRequest {
    /// Page number (1-based); 0 is treated as 1
    pub page: usize,

    /// Items per page
    #[validate(range(min = 1, max = 1000))]
    pub per_page: usize,
}

impl PageRequest {
    /// Request a page with the given size
    pub const fn new(page: usize, per_page: usize) -> Self {
        Self { page, per_page }
    }

    /// Effective page number
    pub fn page(&self) -> usize {
        self.page.max(1)
    }

    /// Effective page size
    pub fn per_page(&self) -> usize {
        self.per_page.max(1)
    }

    /// Index of the first item on the page
    pub fn offset(&self) -> usize {
        (self.page() - 1).saturating_mul(self.per_page())
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: GROUPS_PER_PAGE,
        }
    }
}

/// One page of items with its metadata
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    /// Current page (1-based)
    pub page: usize,

    /// Items per page
    pub per_page: usize,

    /// Number of items across all pages
    pub total_items: usize,

    /// Number of pages (at least 1)
    pub total_pages: usize,

    /// Whether a later page exists
    pub has_next: bool,

    /// Whether an earlier page exists
    pub has_prev: bool,

    /// Items on this page; empty past the last page
    pub items: Vec<T>,
}

impl<T> Page<T> {
    /// Slice one page out of `items`
    pub fn paginate(items: Vec<T>, request: PageRequest) -> Self {
        let page = request.page();
        let per_page = request.per_page();
        let total_items = items.len();
        let total_pages = total_items.div_ceil(per_page).max(1);
        let offset = request.offset();

        let items: Vec<T> = items.into_iter().skip(offset).take(per_page).collect();

        Self {
            page,
            per_page,
            total_items,
            total_pages,
            has_next: offset.saturating_add(per_page) < total_items,
            has_prev: page > 1,
            items,
        }
    }

    /// Next page number, if any
    pub const fn next_page(&self) -> Option<usize> {
        if self.has_next { Some(self.page + 1) } else { None }
    }

    /// Previous page number, if any
    pub const fn prev_page(&self) -> Option<usize> {
        if self.has_prev { Some(self.page - 1) } else { None }
    }

    /// Transform the items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            per_page: self.per_page,
            total_items: self.total_items,
            total_pages: self.total_pages,
            has_next: self.has_next,
            has_prev: self.has_prev,
            items: self.items.into_iter().map(f).collect(),
        }
    }
}
