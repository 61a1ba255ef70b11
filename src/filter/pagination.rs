//! Pagination envelope builder.

use serde::Serialize;

pub const MAX_PAGE_SIZE: u64 = 100;

/// Clamp a 1-based page number; anything below 1 becomes 1 so the derived
/// skip offset can never go negative.
pub fn clamp_page(page: Option<u64>) -> u64 {
    page.unwrap_or(1).max(1)
}

pub fn clamp_limit(limit: Option<u64>, default: u64) -> u64 {
    limit.unwrap_or(default).clamp(1, MAX_PAGE_SIZE)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub total: u64,
    pub current_page: u64,
    pub total_pages: u64,
    pub has_more: bool,
    pub next_page: Option<u64>,
    pub limit: u64,
}

impl Pagination {
    /// `limit` must be positive; callers clamp it at parse time.
    pub fn new(total: u64, page: u64, limit: u64) -> Pagination {
        debug_assert!(limit > 0);
        let total_pages = total.div_ceil(limit);
        let has_more = page < total_pages;
        Pagination {
            total,
            current_page: page,
            total_pages,
            has_more,
            next_page: if has_more { Some(page + 1) } else { None },
            limit,
        }
    }

    /// Saturates so an absurd page number from the query string yields an
    /// offset past the end instead of overflowing.
    pub fn skip(page: u64, limit: u64) -> u64 {
        page.saturating_sub(1).saturating_mul(limit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_rows_in_pages_of_five() {
        let pagination = Pagination::new(12, 1, 5);
        assert_eq!(pagination.total_pages, 3);
        assert!(pagination.has_more);
        assert_eq!(pagination.next_page, Some(2));
    }

    #[test]
    fn last_page_has_no_next() {
        let pagination = Pagination::new(12, 3, 5);
        assert!(!pagination.has_more);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn total_pages_is_ceiling_division() {
        assert_eq!(Pagination::new(0, 1, 10).total_pages, 0);
        assert_eq!(Pagination::new(10, 1, 10).total_pages, 1);
        assert_eq!(Pagination::new(11, 1, 10).total_pages, 2);
    }

    #[test]
    fn page_beyond_the_end_has_no_next() {
        let pagination = Pagination::new(3, 5, 5);
        assert!(!pagination.has_more);
        assert_eq!(pagination.next_page, None);
    }

    #[test]
    fn page_clamps_below_one() {
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(None), 1);
        assert_eq!(clamp_page(Some(7)), 7);
        assert_eq!(Pagination::skip(1, 10), 0);
        assert_eq!(Pagination::skip(3, 5), 10);
    }

    #[test]
    fn skip_saturates_on_huge_page() {
        assert_eq!(Pagination::skip(clamp_page(Some(u64::MAX)), 5), u64::MAX);
        assert_eq!(Pagination::skip(u64::MAX, u64::MAX), u64::MAX);
    }

    #[test]
    fn limit_clamps_to_sane_bounds() {
        assert_eq!(clamp_limit(None, 10), 10);
        assert_eq!(clamp_limit(Some(0), 10), 1);
        assert_eq!(clamp_limit(Some(500), 10), MAX_PAGE_SIZE);
    }
}
