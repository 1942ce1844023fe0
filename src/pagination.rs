//! Page-based and infinite-scroll consumption of a filtered list.
//!
//! The controller exposes pure state transitions only; wiring them to
//! keyboard or scroll events is the caller's concern.

use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaginationMode {
    #[default]
    Paged,
    Infinite,
}

#[derive(Debug, Clone)]
pub struct PaginationController {
    mode: PaginationMode,
    page_size: usize,
    current_page: usize,
    loaded_count: usize,
    is_loading: bool,
}

impl PaginationController {
    pub fn new(mode: PaginationMode, page_size: usize) -> Self {
        Self {
            mode,
            page_size: page_size.max(1),
            current_page: 1,
            loaded_count: 0,
            is_loading: false,
        }
    }

    pub fn configure(&mut self, mode: PaginationMode, page_size: usize) {
        *self = Self::new(mode, page_size);
    }

    /// Reset to the initial position. Called whenever the filter changes.
    pub fn reset(&mut self) {
        self.current_page = 1;
        self.loaded_count = 0;
        self.is_loading = false;
    }

    pub fn mode(&self) -> PaginationMode {
        self.mode
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    // ------------------------------------------------------------------
    // Paged mode
    // ------------------------------------------------------------------

    pub fn total_pages(&self, count: usize) -> usize {
        count.div_ceil(self.page_size)
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    /// Jump to `page`, clamped to `[1, max(1, total_pages)]`.
    pub fn go_to(&mut self, page: usize, count: usize) {
        let last = self.total_pages(count).max(1);
        self.current_page = page.clamp(1, last);
    }

    /// Advance one page; a no-op on the last page.
    pub fn next(&mut self, count: usize) {
        if self.current_page < self.total_pages(count) {
            self.current_page += 1;
        }
    }

    /// Go back one page; a no-op on the first page.
    pub fn previous(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// The slice of `list` visible on the current page.
    pub fn visible_slice<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        let start = (self.current_page - 1) * self.page_size;
        let end = (start + self.page_size).min(list.len());
        if start >= list.len() {
            &[]
        } else {
            &list[start..end]
        }
    }

    // ------------------------------------------------------------------
    // Infinite mode
    // ------------------------------------------------------------------

    pub fn loaded_count(&self) -> usize {
        self.loaded_count
    }

    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    /// Start loading the next batch. Returns the index range to append, or
    /// None when a load is already in flight or everything is loaded.
    /// Re-entrant calls while loading are no-ops; this flag is the sole
    /// guard against duplicate appends from rapid scroll events.
    pub fn begin_load(&mut self, count: usize) -> Option<Range<usize>> {
        if self.is_loading || self.loaded_count >= count {
            return None;
        }
        self.is_loading = true;
        let end = (self.loaded_count + self.page_size).min(count);
        Some(self.loaded_count..end)
    }

    /// Commit a batch started by `begin_load`. The loaded counter only
    /// advances here, after the batch has been appended.
    pub fn commit_load(&mut self, batch: Range<usize>) {
        self.loaded_count = batch.end;
        self.is_loading = false;
    }

    /// Begin and commit in one step, for synchronous drivers.
    pub fn load_more(&mut self, count: usize) {
        if let Some(batch) = self.begin_load(count) {
            self.commit_load(batch);
        }
    }

    /// The already-loaded prefix of `list`.
    pub fn loaded_slice<'a, T>(&self, list: &'a [T]) -> &'a [T] {
        &list[..self.loaded_count.min(list.len())]
    }
}

impl Default for PaginationController {
    fn default() -> Self {
        Self::new(PaginationMode::Paged, 10)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages() {
        let pages = PaginationController::new(PaginationMode::Paged, 10);
        assert_eq!(pages.total_pages(25), 3);
        assert_eq!(pages.total_pages(0), 0);
        assert_eq!(pages.total_pages(10), 1);
    }

    #[test]
    fn test_last_page_shows_remainder() {
        let list: Vec<usize> = (1..=25).collect();
        let mut pages = PaginationController::new(PaginationMode::Paged, 10);
        pages.go_to(3, list.len());
        assert_eq!(pages.visible_slice(&list), &[21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_next_is_noop_on_last_page() {
        let mut pages = PaginationController::new(PaginationMode::Paged, 10);
        pages.go_to(3, 25);
        pages.next(25);
        assert_eq!(pages.current_page(), 3);
    }

    #[test]
    fn test_previous_is_noop_on_first_page() {
        let mut pages = PaginationController::new(PaginationMode::Paged, 10);
        pages.previous();
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn test_go_to_clamps() {
        let mut pages = PaginationController::new(PaginationMode::Paged, 10);
        pages.go_to(99, 25);
        assert_eq!(pages.current_page(), 3);
        pages.go_to(0, 25);
        assert_eq!(pages.current_page(), 1);
        // Empty list still has a valid page 1.
        pages.go_to(5, 0);
        assert_eq!(pages.current_page(), 1);
    }

    #[test]
    fn test_infinite_reaches_count_then_noops() {
        let mut scroll = PaginationController::new(PaginationMode::Infinite, 10);
        scroll.load_more(25);
        scroll.load_more(25);
        scroll.load_more(25);
        assert_eq!(scroll.loaded_count(), 25);
        scroll.load_more(25);
        assert_eq!(scroll.loaded_count(), 25);
    }

    #[test]
    fn test_infinite_guard_prevents_double_append() {
        let mut scroll = PaginationController::new(PaginationMode::Infinite, 10);
        let batch = scroll.begin_load(25).unwrap();
        // A second scroll event arrives while the first batch is pending.
        assert!(scroll.begin_load(25).is_none());
        scroll.commit_load(batch);
        assert_eq!(scroll.loaded_count(), 10);
    }

    #[test]
    fn test_loaded_count_advances_only_on_commit() {
        let mut scroll = PaginationController::new(PaginationMode::Infinite, 10);
        let batch = scroll.begin_load(25).unwrap();
        assert_eq!(scroll.loaded_count(), 0);
        scroll.commit_load(batch);
        assert_eq!(scroll.loaded_count(), 10);
    }

    #[test]
    fn test_reset_restores_initial_position() {
        let mut pages = PaginationController::new(PaginationMode::Paged, 10);
        pages.go_to(3, 25);
        pages.reset();
        assert_eq!(pages.current_page(), 1);

        let mut scroll = PaginationController::new(PaginationMode::Infinite, 10);
        scroll.load_more(25);
        scroll.reset();
        assert_eq!(scroll.loaded_count(), 0);
        assert!(!scroll.is_loading());
    }

    #[test]
    fn test_loaded_slice() {
        let list: Vec<usize> = (1..=25).collect();
        let mut scroll = PaginationController::new(PaginationMode::Infinite, 10);
        scroll.load_more(list.len());
        assert_eq!(scroll.loaded_slice(&list).len(), 10);
    }
}
