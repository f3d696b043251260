//! TechStore back office.
//!
//! Read-mostly views over mock fixture data: order management, user
//! management and dashboard statistics, plus a product editor that works on
//! a local copy of the catalog. Nothing here writes through to the
//! storefront; the back office and the storefront deliberately share only
//! the core types.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod fixtures;
pub mod models;
pub mod orders;
pub mod products;
pub mod users;

/// One page of query results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total matches before pagination.
    pub total: usize,
    /// 1-based page index.
    pub page: usize,
    pub per_page: usize,
}

impl<T> Page<T> {
    /// Number of pages needed for `total` items.
    #[must_use]
    pub fn total_pages(&self) -> usize {
        if self.per_page == 0 {
            return 0;
        }
        self.total.div_ceil(self.per_page)
    }
}

pub(crate) fn paginate<T>(items: Vec<T>, page: usize, per_page: usize) -> Page<T> {
    let total = items.len();
    let page = page.max(1);
    let start = (page - 1).saturating_mul(per_page).min(total);
    let end = start.saturating_add(per_page).min(total);
    let items = items.into_iter().skip(start).take(end - start).collect();
    Page {
        items,
        total,
        page,
        per_page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_windows() {
        let page = paginate((1..=10).collect::<Vec<_>>(), 2, 4);
        assert_eq!(page.items, vec![5, 6, 7, 8]);
        assert_eq!(page.total, 10);
        assert_eq!(page.total_pages(), 3);
    }

    #[test]
    fn test_paginate_past_end_is_empty() {
        let page = paginate(vec![1, 2, 3], 5, 2);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 3);
    }

    #[test]
    fn test_paginate_page_zero_clamps_to_first() {
        let page = paginate(vec![1, 2, 3], 0, 2);
        assert_eq!(page.items, vec![1, 2]);
        assert_eq!(page.page, 1);
    }
}
