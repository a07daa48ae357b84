//! Pagination utilities for terminal list views

/// Page size constant for all pagination
pub const PAGE_SIZE: usize = 12;

/// Pagination metadata calculated from total results
#[derive(Debug, Clone, Copy)]
pub struct Pagination {
    /// Current page number (1-indexed)
    pub page: usize,
    /// Total number of pages, never zero
    pub total_pages: usize,
    /// Start index into the filtered result set
    pub offset: usize,
}

/// Calculate pagination metadata from total results and requested page
///
/// Ensures page is within valid bounds [1, total_pages]. An empty result
/// set still reports one (empty) page.
///
/// # Examples
/// ```
/// use signcast_ui::pagination::calculate_pagination;
///
/// // 30 total results = 3 pages (12 + 12 + 6)
/// let p = calculate_pagination(30, 2);
/// assert_eq!(p.page, 2);
/// assert_eq!(p.total_pages, 3);
/// assert_eq!(p.offset, 12);
///
/// // Requesting an out-of-bounds page gets clamped
/// let p = calculate_pagination(30, 99);
/// assert_eq!(p.page, 3);
/// assert_eq!(p.offset, 24);
/// ```
pub fn calculate_pagination(total_results: usize, requested_page: usize) -> Pagination {
    let total_pages = ((total_results + PAGE_SIZE - 1) / PAGE_SIZE).max(1);
    let page = requested_page.clamp(1, total_pages);
    let offset = (page - 1) * PAGE_SIZE;

    Pagination {
        page,
        total_pages,
        offset,
    }
}

/// Slice one page out of a fully filtered result set
pub fn page_slice<'a, T>(items: &'a [T], pagination: &Pagination) -> &'a [T] {
    let start = pagination.offset.min(items.len());
    let end = (start + PAGE_SIZE).min(items.len());
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pagination_normal() {
        let p = calculate_pagination(30, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 3);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_pagination_first_page() {
        let p = calculate_pagination(20, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_out_of_bounds_high() {
        let p = calculate_pagination(20, 99);
        assert_eq!(p.page, 2); // Clamped to last page
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_pagination_out_of_bounds_low() {
        let p = calculate_pagination(20, 0);
        assert_eq!(p.page, 1); // Clamped to first page
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_empty_still_has_one_page() {
        let p = calculate_pagination(0, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.total_pages, 1);
        assert_eq!(p.offset, 0);
    }

    #[test]
    fn test_pagination_exact_page_boundary() {
        let p = calculate_pagination(24, 2);
        assert_eq!(p.page, 2);
        assert_eq!(p.total_pages, 2);
        assert_eq!(p.offset, 12);
    }

    #[test]
    fn test_page_slice_partial_last_page() {
        let items: Vec<u32> = (0..30).collect();
        let p = calculate_pagination(items.len(), 3);
        assert_eq!(page_slice(&items, &p), &items[24..30]);
    }

    #[test]
    fn test_page_slice_empty() {
        let items: Vec<u32> = Vec::new();
        let p = calculate_pagination(0, 5);
        assert!(page_slice(&items, &p).is_empty());
    }
}
