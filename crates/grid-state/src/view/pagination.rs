//! Pagination control state.

use crate::config::ROWS_PER_PAGE_OPTIONS;
use crate::state::PaginationState;

/// What the pagination control shows for a filtered row count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub row_count: usize,
    pub page_index: usize,
    pub page_size: usize,
    /// Number of pages, at least one.
    pub page_count: usize,
    pub can_previous: bool,
    pub can_next: bool,
    pub last_page_index: usize,
    pub rows_per_page_options: &'static [usize],
}

impl PageInfo {
    /// Pagination info for `row_count` filtered rows, or `None` when there
    /// are no rows and the control is hidden.
    ///
    /// A page index past the last page is clamped to the last page.
    pub fn new(row_count: usize, pagination: PaginationState) -> Option<Self> {
        if row_count == 0 {
            return None;
        }
        let page_size = pagination.page_size.max(1);
        let page_count = row_count.div_ceil(page_size);
        let last_page_index = page_count.saturating_sub(1);
        let page_index = pagination.page_index.min(last_page_index);

        Some(Self {
            row_count,
            page_index,
            page_size,
            page_count,
            can_previous: page_index > 0,
            can_next: page_index < last_page_index,
            last_page_index,
            rows_per_page_options: &ROWS_PER_PAGE_OPTIONS,
        })
    }

    /// One-based range of rows on the current page, e.g. `(26, 50)`.
    pub fn visible_range(&self) -> (usize, usize) {
        let page_size = self.page_size.max(1);
        let first = self.page_index.saturating_mul(page_size).saturating_add(1);
        let last = first.saturating_add(page_size - 1).min(self.row_count);
        (first.min(self.row_count), last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_without_rows() {
        assert_eq!(PageInfo::new(0, PaginationState::new(0, 25)), None);
    }

    #[test]
    fn middle_page_can_move_both_ways() {
        let info = PageInfo::new(120, PaginationState::new(2, 25)).unwrap();
        assert_eq!(info.page_count, 5);
        assert_eq!(info.last_page_index, 4);
        assert!(info.can_previous);
        assert!(info.can_next);
        assert_eq!(info.visible_range(), (51, 75));
        assert_eq!(info.rows_per_page_options, &[10, 25, 50, 100]);
    }

    #[test]
    fn edges() {
        let first = PageInfo::new(30, PaginationState::new(0, 25)).unwrap();
        assert!(!first.can_previous);
        assert!(first.can_next);

        let last = PageInfo::new(30, PaginationState::new(1, 25)).unwrap();
        assert!(!last.can_next);
        assert_eq!(last.visible_range(), (26, 30));

        let single = PageInfo::new(25, PaginationState::new(0, 25)).unwrap();
        assert_eq!(single.page_count, 1);
        assert!(!single.can_next);
    }

    #[test]
    fn page_index_past_the_end_is_clamped() {
        let info = PageInfo::new(380, PaginationState::new(1 << 62, 25)).unwrap();
        assert_eq!(info.page_index, 15);
        assert!(!info.can_next);
        assert_eq!(info.visible_range(), (376, 380));

        let info = PageInfo::new(10, PaginationState::new(usize::MAX, usize::MAX)).unwrap();
        assert_eq!(info.visible_range(), (1, 10));
    }

    #[test]
    fn zero_page_size_counts_as_one() {
        let info = PageInfo::new(3, PaginationState::new(1, 0)).unwrap();
        assert_eq!(info.page_size, 1);
        assert_eq!(info.page_count, 3);
        assert_eq!(info.visible_range(), (2, 2));
    }
}
