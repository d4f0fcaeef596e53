use std::num::NonZeroU64;

/// A single slot in the page selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PageItem {
    Page(u64),
    /// Page numbers skipped between the neighbouring entries.
    Ellipsis,
}

/// Page arithmetic for the feed: how many pages exist and which page
/// numbers a page selector should show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub total_count: u64,
    pub page_size: NonZeroU64,
    /// 1-based index of the page currently shown.
    pub current_page: u64,
}

impl Pagination {
    /// Up to this many pages, every page number is shown.
    const MAX_PAGES_SHOWN: u64 = 5;

    #[must_use]
    pub const fn new(total_count: u64, page_size: NonZeroU64, current_page: u64) -> Self {
        Self {
            total_count,
            page_size,
            current_page,
        }
    }

    #[must_use]
    pub const fn total_pages(&self) -> u64 {
        self.total_count.div_ceil(self.page_size.get())
    }

    /// Whether `page` can be requested at all.
    #[must_use]
    pub const fn contains(&self, page: u64) -> bool {
        page >= 1 && page <= self.total_pages()
    }

    #[must_use]
    pub const fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    #[must_use]
    pub const fn has_next(&self) -> bool {
        self.current_page < self.total_pages()
    }

    /// A selector is only worth showing with more than one page.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.total_pages() > 1
    }

    /// Page numbers to display, always including the first and last
    /// page and keeping up to three interior numbers around the current
    /// page.
    #[must_use]
    pub fn window(&self) -> Vec<PageItem> {
        let total = self.total_pages();
        if total <= Self::MAX_PAGES_SHOWN {
            return (1..=total).map(PageItem::Page).collect();
        }

        let current = self.current_page.clamp(1, total);
        let mut start = current.saturating_sub(1).max(2);
        let mut end = (current + 1).min(total - 1);

        if current <= 2 {
            end = (total - 1).min(4);
        }
        if current >= total - 1 {
            start = (total - 3).max(2);
        }

        let mut items = Vec::with_capacity(7);
        items.push(PageItem::Page(1));
        if start > 2 {
            items.push(PageItem::Ellipsis);
        }
        items.extend((start..=end).map(PageItem::Page));
        if end < total - 1 {
            items.push(PageItem::Ellipsis);
        }
        items.push(PageItem::Page(total));
        items
    }
}

#[cfg(test)]
mod tests {
    use super::PageItem::{Ellipsis, Page};
    use super::*;

    fn pagination(total_count: u64, page_size: u64, current_page: u64) -> Pagination {
        Pagination::new(total_count, NonZeroU64::new(page_size).unwrap(), current_page)
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(pagination(95, 10, 1).total_pages(), 10);
        assert_eq!(pagination(100, 10, 1).total_pages(), 10);
        assert_eq!(pagination(101, 10, 1).total_pages(), 11);
        assert_eq!(pagination(0, 10, 1).total_pages(), 0);
    }

    #[test]
    fn contains_rejects_out_of_range_pages() {
        let p = pagination(95, 10, 1);
        assert!(!p.contains(0));
        assert!(p.contains(1));
        assert!(p.contains(10));
        assert!(!p.contains(11));
    }

    #[test]
    fn window_at_first_page() {
        assert_eq!(
            pagination(95, 10, 1).window(),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_in_the_middle() {
        assert_eq!(
            pagination(95, 10, 5).window(),
            vec![Page(1), Ellipsis, Page(4), Page(5), Page(6), Ellipsis, Page(10)]
        );
    }

    #[test]
    fn window_near_the_end() {
        assert_eq!(
            pagination(95, 10, 10).window(),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
        assert_eq!(
            pagination(95, 10, 9).window(),
            vec![Page(1), Ellipsis, Page(7), Page(8), Page(9), Page(10)]
        );
    }

    #[test]
    fn window_marks_any_skipped_page() {
        assert_eq!(
            pagination(60, 10, 3).window(),
            vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(6)]
        );
        assert_eq!(
            pagination(60, 10, 4).window(),
            vec![Page(1), Ellipsis, Page(3), Page(4), Page(5), Page(6)]
        );
    }

    #[test]
    fn small_totals_show_every_page() {
        assert_eq!(
            pagination(42, 10, 2).window(),
            vec![Page(1), Page(2), Page(3), Page(4), Page(5)]
        );
        assert_eq!(pagination(3, 10, 1).window(), vec![Page(1)]);
        assert!(pagination(0, 10, 1).window().is_empty());
    }

    #[test]
    fn visibility_and_neighbours() {
        let single = pagination(8, 10, 1);
        assert!(!single.is_visible());
        assert!(!single.has_previous());
        assert!(!single.has_next());

        let middle = pagination(95, 10, 4);
        assert!(middle.is_visible());
        assert!(middle.has_previous());
        assert!(middle.has_next());
        assert!(!pagination(95, 10, 10).has_next());
    }
}
