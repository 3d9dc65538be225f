//! Slicing an ordered result into one page.
//!
//! Pages are 0-based: page `p` of size `t` is the half-open range
//! `[p * t, p * t + t)`, clamped to the input. Pagination is always the last
//! step, after every filter and sort has seen the whole catalog.

use serde::Serialize;

/// Return page `page` of size `take` from `items`
///
/// An out-of-range page is an empty `Vec`, never an error.
pub fn paginate<T>(items: Vec<T>, page: usize, take: usize) -> Vec<T> {
    let start = page.saturating_mul(take);
    if start >= items.len() {
        return Vec::new();
    }
    items.into_iter().skip(start).take(take).collect()
}

/// Number of pages needed to show `total` items at `take` per page
pub fn page_count(total: usize, take: usize) -> usize {
    if take == 0 {
        return 0;
    }
    total.div_ceil(take)
}

/// One page of results plus the size of the full result it was cut from
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub take: usize,
    /// Number of results before pagination
    pub total: usize,
}

impl<T> Page<T> {
    /// Cut page `page` out of the complete, already ordered `items`
    pub fn new(items: Vec<T>, page: usize, take: usize) -> Self {
        let total = items.len();
        Self {
            items: paginate(items, page, take),
            page,
            take,
            total,
        }
    }

    /// Total number of pages for this result
    pub fn pages(&self) -> usize {
        page_count(self.total, self.take)
    }

    /// Whether a page after this one has results
    pub fn has_next(&self) -> bool {
        self.page.saturating_add(1) < self.pages()
    }

    /// Transform every item, keeping the paging metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            take: self.take,
            total: self.total,
        }
    }
}
