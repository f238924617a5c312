/// Fixed-size client-side pagination.
///
/// Pages are 1-based. The current page is always kept inside
/// `[1, total_pages(len)]`, and moving past either end is a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    page_size: usize,
    current: usize,
}

impl Pagination {
    /// A zero page size is treated as 1.
    #[must_use]
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
            current: 1,
        }
    }

    /// Number of pages for `len` rows. Never less than 1.
    #[must_use]
    pub fn total_pages(&self, len: usize) -> usize {
        len.div_ceil(self.page_size).max(1)
    }

    /// Current page clamped for `len` rows.
    #[must_use]
    pub fn current(&self, len: usize) -> usize {
        self.current.clamp(1, self.total_pages(len))
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Re-clamp the stored page after the row count changed.
    pub fn clamp(&mut self, len: usize) {
        self.current = self.current(len);
    }

    #[must_use]
    pub fn has_prev(&self, len: usize) -> bool {
        self.current(len) > 1
    }

    #[must_use]
    pub fn has_next(&self, len: usize) -> bool {
        self.current(len) < self.total_pages(len)
    }

    pub fn next(&mut self, len: usize) {
        if self.has_next(len) {
            self.current = self.current(len) + 1;
        }
    }

    pub fn prev(&mut self, len: usize) {
        if self.has_prev(len) {
            self.current = self.current(len) - 1;
        }
    }

    /// Index range of the current page within `len` rows.
    #[must_use]
    pub fn range(&self, len: usize) -> std::ops::Range<usize> {
        let start = (self.current(len) - 1) * self.page_size;
        let start = start.min(len);
        let end = (start + self.page_size).min(len);
        start..end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fifteen_rows_make_two_pages() {
        let mut pages = Pagination::new(8);
        assert_eq!(pages.total_pages(15), 2);
        assert_eq!(pages.range(15), 0..8);

        pages.next(15);
        assert_eq!(pages.current(15), 2);
        assert_eq!(pages.range(15), 8..15);
    }

    #[test]
    fn empty_list_has_one_page() {
        let pages = Pagination::new(8);
        assert_eq!(pages.total_pages(0), 1);
        assert_eq!(pages.range(0), 0..0);
        assert!(!pages.has_next(0));
        assert!(!pages.has_prev(0));
    }

    #[test]
    fn moving_past_the_ends_is_a_noop() {
        let mut pages = Pagination::new(8);
        pages.prev(20);
        assert_eq!(pages.current(20), 1);
        pages.next(20);
        pages.next(20);
        pages.next(20);
        assert_eq!(pages.current(20), 3);
        assert!(!pages.has_next(20));
    }

    #[test]
    fn current_page_follows_shrinking_lists() {
        let mut pages = Pagination::new(8);
        pages.next(20);
        pages.next(20);
        assert_eq!(pages.current(5), 1);
        pages.clamp(9);
        assert_eq!(pages.current(20), 2);
    }
}
