//! The browser context: one object wiring the catalog, filter, pagination,
//! cache, preview modal, and history together.
//!
//! All IO goes through the injected [`ContentFetcher`] and all time through
//! caller-supplied instants, so every flow here is testable without a
//! network or a clock.

use std::time::{Duration, Instant};

use crate::catalog::{filter, Catalog, CatalogError, CatalogItem, Direction, FilterState, TypeFilter};
use crate::content::{excerpt, ContentCache, ContentFetcher};
use crate::keys::{dispatch, Action, Key, UiContext};
use crate::pagination::{PaginationController, PaginationMode};
use crate::preview::{ModalError, PreviewModal, ViewMode};
use crate::render::MarkdownRenderer;
use crate::toc::HeadingOffset;
use crate::urlstate::{parse_fragment, HistoryStack, PopEvent, UrlState};

const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
const SCROLL_THROTTLE: Duration = Duration::from_millis(100);

/// Result of resolving a deep link at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeepLink {
    /// No modal parameters in the fragment.
    Ignored,
    /// The referenced item was found and its preview opened.
    Opened(String),
    /// The referenced item does not exist; the fragment was scrubbed.
    NotFound(String),
    /// The catalog has not loaded yet; retry after it arrives.
    Deferred(String),
}

pub struct Browser {
    catalog: Catalog,
    filter_state: FilterState,
    filtered: Vec<CatalogItem>,
    pagination: PaginationController,
    cache: ContentCache,
    fetcher: Box<dyn ContentFetcher>,
    renderer: Box<dyn MarkdownRenderer>,
    modal: PreviewModal,
    history: HistoryStack,
    search_debounce: crate::timing::Debouncer,
    pending_search: Option<String>,
    list_throttle: crate::timing::Throttle,
    modal_throttle: crate::timing::Throttle,
    pub help_open: bool,
    pub tooltip_open: bool,
}

impl Browser {
    pub fn new(
        catalog: Catalog,
        fetcher: Box<dyn ContentFetcher>,
        renderer: Box<dyn MarkdownRenderer>,
        mode: PaginationMode,
        page_size: usize,
    ) -> Self {
        let mut browser = Self {
            catalog,
            filter_state: FilterState::default(),
            filtered: Vec::new(),
            pagination: PaginationController::new(mode, page_size),
            cache: ContentCache::new(),
            fetcher,
            renderer,
            modal: PreviewModal::new(),
            history: HistoryStack::new(),
            search_debounce: crate::timing::Debouncer::new(SEARCH_DEBOUNCE),
            pending_search: None,
            list_throttle: crate::timing::Throttle::new(SCROLL_THROTTLE),
            modal_throttle: crate::timing::Throttle::new(SCROLL_THROTTLE),
            help_open: false,
            tooltip_open: false,
        };
        browser.recompute();
        browser
    }

    // ------------------------------------------------------------------
    // List state
    // ------------------------------------------------------------------

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn filtered(&self) -> &[CatalogItem] {
        &self.filtered
    }

    pub fn filter_state(&self) -> &FilterState {
        &self.filter_state
    }

    pub fn pagination(&self) -> &PaginationController {
        &self.pagination
    }

    pub fn modal(&self) -> &PreviewModal {
        &self.modal
    }

    pub fn history(&self) -> &HistoryStack {
        &self.history
    }

    /// Recompute the filtered list and rewind pagination. Every filter-state
    /// change funnels through here.
    fn recompute(&mut self) {
        self.filtered = filter(self.catalog.items(), &self.filter_state);
        self.pagination.reset();
        if self.pagination.mode() == PaginationMode::Infinite {
            self.pagination.load_more(self.filtered.len());
        }
    }

    /// Apply a search term immediately, bypassing the debounce.
    pub fn set_search(&mut self, term: &str) {
        self.filter_state.search_term = term.to_string();
        self.pending_search = None;
        self.recompute();
    }

    pub fn set_type(&mut self, selected: TypeFilter) {
        self.filter_state.selected_type = selected;
        self.recompute();
    }

    /// Record a keystroke in the search box. The list is not recomputed
    /// until the input has been quiet for the debounce window.
    pub fn edit_search(&mut self, term: &str, now: Instant) {
        self.pending_search = Some(term.to_string());
        self.search_debounce.trigger(now);
    }

    /// Advance debounced work. Returns true when the filtered list changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        if self.search_debounce.poll(now) {
            if let Some(term) = self.pending_search.take() {
                self.filter_state.search_term = term;
                self.recompute();
                return true;
            }
        }
        false
    }

    /// Items currently on screen: the visible page, or the loaded prefix in
    /// infinite mode.
    pub fn visible(&self) -> &[CatalogItem] {
        match self.pagination.mode() {
            PaginationMode::Paged => self.pagination.visible_slice(&self.filtered),
            PaginationMode::Infinite => self.pagination.loaded_slice(&self.filtered),
        }
    }

    /// Stats line: shown count, total, and any active filters.
    pub fn stats(&self) -> String {
        let shown = self.visible().len();
        let total = self.catalog.len();
        match self.filter_state.summary() {
            Some(summary) => format!("Showing {} of {} items ({})", shown, total, summary),
            None => format!("Showing {} of {} items", shown, total),
        }
    }

    pub fn is_empty_result(&self) -> bool {
        self.filtered.is_empty()
    }

    pub fn next_page(&mut self) {
        self.pagination.next(self.filtered.len());
    }

    pub fn previous_page(&mut self) {
        self.pagination.previous();
    }

    pub fn go_to_page(&mut self, page: usize) {
        self.pagination.go_to(page, self.filtered.len());
    }

    /// Throttled scroll handler for infinite mode: when the viewport is near
    /// the bottom, append the next batch.
    pub fn on_list_scroll(&mut self, now: Instant, near_bottom: bool) {
        if !self.list_throttle.allow(now) {
            return;
        }
        if near_bottom && self.pagination.mode() == PaginationMode::Infinite {
            self.pagination.load_more(self.filtered.len());
        }
    }

    /// Tooltip body for a card: cached excerpt of the item's content.
    pub fn tooltip_excerpt(&mut self, id: &str) -> Result<String, CatalogError> {
        let item = self.catalog.find_by_id(id)?.clone();
        let text = self.cache.fetch(self.fetcher.as_ref(), &item.source_url);
        Ok(excerpt(&text))
    }

    // ------------------------------------------------------------------
    // Modal lifecycle
    // ------------------------------------------------------------------

    /// Open the preview for `id` and record it in history.
    pub fn open_item(&mut self, id: &str) -> Result<(), CatalogError> {
        self.open_with(id, None, ViewMode::Preview, true)
    }

    fn open_with(
        &mut self,
        id: &str,
        section: Option<&str>,
        view: ViewMode,
        record: bool,
    ) -> Result<(), CatalogError> {
        let item = self.catalog.find_by_id(id)?.clone();
        let ticket = self.modal.open(&item, section, view);
        let text = self.cache.fetch(self.fetcher.as_ref(), &ticket.url);
        if let Some(update) = self.modal.complete(&ticket, Ok(text), self.renderer.as_ref()) {
            if record {
                self.history
                    .push(&update.item_id, update.view, update.section.as_deref());
            }
        }
        Ok(())
    }

    /// Close the modal and clear the modal parameters from the URL.
    pub fn close_modal(&mut self) {
        if self.modal.is_open() {
            self.modal.close();
            self.history.clear();
        }
    }

    pub fn toggle_source(&mut self) -> Result<(), ModalError> {
        let update = self.modal.toggle_source_view()?;
        self.history
            .push(&update.item_id, update.view, update.section.as_deref());
        Ok(())
    }

    pub fn navigate_adjacent(&mut self, direction: Direction) -> Result<(), CatalogError> {
        let ticket = self.modal.navigate_adjacent(&self.filtered, direction)?;
        let text = self.cache.fetch(self.fetcher.as_ref(), &ticket.url);
        if let Some(update) = self.modal.complete(&ticket, Ok(text), self.renderer.as_ref()) {
            self.history
                .push(&update.item_id, update.view, update.section.as_deref());
        }
        Ok(())
    }

    pub fn select_section(&mut self, section: &str) -> Result<(), ModalError> {
        let update = self.modal.select_section(section)?;
        self.history
            .push(&update.item_id, update.view, update.section.as_deref());
        Ok(())
    }

    /// Throttled scroll-spy update while the modal body scrolls.
    pub fn on_modal_scroll(
        &mut self,
        now: Instant,
        headings: &[HeadingOffset],
        scroll_top: f64,
        viewport_height: f64,
    ) {
        if self.modal_throttle.allow(now) {
            self.modal.update_scroll(headings, scroll_top, viewport_height);
        }
    }

    // ------------------------------------------------------------------
    // History and deep links
    // ------------------------------------------------------------------

    /// Resolve the startup fragment. A valid item deep link opens the modal
    /// directly (with view and section applied); an unknown id is reported
    /// and the fragment scrubbed so reloads do not repeat the failure. When
    /// the fragment arrives before the catalog (the catalog is empty), the
    /// link is deferred rather than rejected, so the driver can retry once
    /// after the catalog loads.
    pub fn bootstrap(&mut self, fragment: &str) -> DeepLink {
        let state = parse_fragment(fragment);
        let Some(id) = state.item_id else {
            return DeepLink::Ignored;
        };
        if self.catalog.is_empty() {
            return DeepLink::Deferred(id);
        }
        match self.open_with(&id, state.section.as_deref(), state.view, true) {
            Ok(()) => DeepLink::Opened(id),
            Err(_) => {
                self.history.replace_clear();
                DeepLink::NotFound(id)
            }
        }
    }

    pub fn back(&mut self) -> bool {
        match self.history.back() {
            Some(pop) => {
                self.apply_pop(pop);
                true
            }
            None => false,
        }
    }

    pub fn forward(&mut self) -> bool {
        match self.history.forward() {
            Some(pop) => {
                self.apply_pop(pop);
                true
            }
            None => false,
        }
    }

    /// Mirror the modal to a history traversal. Traversal never pushes new
    /// entries; the stack position is already where it should be.
    fn apply_pop(&mut self, pop: PopEvent) {
        if pop.modal_open {
            let UrlState { item_id, view, section } = pop.state;
            if let Some(id) = item_id {
                if self.open_with(&id, section.as_deref(), view, false).is_ok() {
                    return;
                }
            }
        }
        self.modal.close();
    }

    // ------------------------------------------------------------------
    // Keyboard
    // ------------------------------------------------------------------

    fn ui_context(&self, in_input: bool) -> UiContext {
        UiContext {
            modal_open: self.modal.is_open(),
            help_open: self.help_open,
            tooltip_open: self.tooltip_open,
            in_input,
        }
    }

    /// Dispatch a key event and apply the resulting action. Returns the
    /// action for the caller's rendering decisions.
    pub fn handle_key(&mut self, key: Key, in_input: bool) -> Action {
        let action = dispatch(key, &self.ui_context(in_input));
        match action {
            Action::CloseModal => self.close_modal(),
            Action::CloseHelp => self.help_open = false,
            Action::CloseTooltip => self.tooltip_open = false,
            Action::OpenHelp => self.help_open = true,
            Action::ToggleSourceView => {
                // Ignored while still loading or errored.
                let _ = self.toggle_source();
            }
            Action::ModalNext => {
                let _ = self.navigate_adjacent(Direction::Next);
            }
            Action::ModalPrevious => {
                let _ = self.navigate_adjacent(Direction::Previous);
            }
            Action::PageNext => self.next_page(),
            Action::PagePrevious => self.previous_page(),
            _ => {}
        }
        action
    }
}
