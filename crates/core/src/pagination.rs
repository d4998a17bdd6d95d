//! Page arithmetic over a fully fetched collection
//!
//! The OpenProject API exposes cursor-based pagination (`nextByOffset`), but
//! the client fetches the whole collection in one request and slices it
//! locally. This module holds the slicing logic so it can be tested without
//! any HTTP involved.

use serde::Serialize;

/// A fixed-size window over a full listing.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: usize,
    pub page: usize,
    pub page_size: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

/// Slice a full listing into the requested page.
///
/// `page` is 1-based. A page past the end of the data yields an empty page
/// with `has_next = false` rather than an error; out-of-range bounds are
/// clamped to the collection size. `page` and `page_size` are clamped to a
/// minimum of 1.
pub fn paginate<T>(all: Vec<T>, page: usize, page_size: usize) -> Page<T> {
    let page = page.max(1);
    let page_size = page_size.max(1);

    let total = all.len();
    let total_pages = total.div_ceil(page_size);

    let start = (page - 1).saturating_mul(page_size).min(total);
    let end = start.saturating_add(page_size).min(total);

    let items = all.into_iter().skip(start).take(end - start).collect();

    Page {
        items,
        total,
        page,
        page_size,
        total_pages,
        has_next: page < total_pages,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paginate_first_page() {
        // Arrange: seven items, pages of three
        let all: Vec<u32> = (1..=7).collect();

        // Act
        let page = paginate(all, 1, 3);

        // Assert
        assert_eq!(page.items, vec![1, 2, 3]);
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        assert!(page.has_next);
    }

    #[test]
    fn test_paginate_last_partial_page() {
        let all: Vec<u32> = (1..=7).collect();

        let page = paginate(all, 3, 3);

        assert_eq!(page.items, vec![7]);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_exact_division_has_no_phantom_page() {
        // Arrange: six items split evenly into pages of three
        let all: Vec<u32> = (1..=6).collect();

        let page = paginate(all, 2, 3);

        assert_eq!(page.items, vec![4, 5, 6]);
        assert_eq!(page.total_pages, 2);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_page_beyond_data_is_empty_not_an_error() {
        let all: Vec<u32> = (1..=7).collect();

        let page = paginate(all, 10, 3);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 7);
        assert_eq!(page.total_pages, 3);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_empty_collection() {
        let page = paginate(Vec::<u32>::new(), 1, 10);

        assert!(page.items.is_empty());
        assert_eq!(page.total, 0);
        assert_eq!(page.total_pages, 0);
        assert!(!page.has_next);
    }

    #[test]
    fn test_paginate_clamps_page_and_size_to_one() {
        let all: Vec<u32> = (1..=3).collect();

        let page = paginate(all, 0, 0);

        assert_eq!(page.page, 1);
        assert_eq!(page.page_size, 1);
        assert_eq!(page.items, vec![1]);
    }

    #[test]
    fn test_paginate_total_pages_is_ceiling_division() {
        for (total, size, expected) in [(0, 5, 0), (1, 5, 1), (5, 5, 1), (6, 5, 2), (11, 5, 3)] {
            let all: Vec<u32> = (0..total).collect();
            let page = paginate(all, 1, size);
            assert_eq!(page.total_pages, expected, "total={total} size={size}");
        }
    }

    #[test]
    fn test_pages_union_reconstructs_the_full_listing() {
        // Arrange: every item must appear exactly once, in order, across pages
        let all: Vec<u32> = (1..=23).collect();
        let page_size = 5;

        // Act: walk every page and concatenate the slices
        let mut seen = Vec::new();
        let mut page_index = 1;
        loop {
            let page = paginate(all.clone(), page_index, page_size);
            seen.extend(page.items);
            if !page.has_next {
                break;
            }
            page_index += 1;
        }

        // Assert
        assert_eq!(seen, all);
        assert_eq!(page_index, 5);
    }
}
