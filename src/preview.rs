//! State machine for the preview modal.
//!
//! States: `Closed → Loading → Preview ⇄ Source`, with `Loading → Error` as
//! a terminal-until-retry substate that keeps the modal alive and shows an
//! inline message plus an external link to the raw source.
//!
//! Loading is split into `open` (which issues a [`LoadTicket`]) and
//! `complete` (which applies the fetched text). The ticket token makes the
//! most recent `open` authoritative: a late-arriving completion for a
//! superseded item is discarded instead of clobbering the current one.

use std::fmt;

use crate::catalog::{self, CatalogItem, CatalogError, Direction};
use crate::render::{render_document, MarkdownRenderer, RenderedDoc};
use crate::toc::{self, HeadingOffset, TocEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Preview,
    Source,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Preview => "preview",
            ViewMode::Source => "source",
        }
    }

    /// Parse a view-mode parameter; anything unrecognized defaults to
    /// preview.
    pub fn parse(value: &str) -> ViewMode {
        match value {
            "source" => ViewMode::Source,
            _ => ViewMode::Preview,
        }
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Loading,
    Preview,
    Source,
    Error,
}

/// Handle for one in-flight content load. The token ties a completion back
/// to the `open` call that requested it.
#[derive(Debug)]
pub struct LoadTicket {
    token: u64,
    /// URL the driver should fetch (the item's source URL; the cache
    /// normalizes it).
    pub url: String,
}

#[derive(Debug)]
pub enum ModalError {
    /// Operation requires an open modal with loaded content.
    NotOpen,
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::NotOpen => write!(f, "No preview is open"),
        }
    }
}

impl std::error::Error for ModalError {}

/// URL-state change reported by a transition, for the history layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlUpdate {
    pub item_id: String,
    pub view: ViewMode,
    pub section: Option<String>,
}

#[derive(Debug, Default)]
pub struct PreviewModal {
    state: Option<ModalStateData>,
    token: u64,
}

#[derive(Debug)]
struct ModalStateData {
    state: ModalState,
    item: CatalogItem,
    requested_view: ViewMode,
    requested_section: Option<String>,
    raw: Option<String>,
    doc: Option<RenderedDoc>,
    toc: Vec<TocEntry>,
    active_section: Option<String>,
    error: Option<String>,
}

impl PreviewModal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ModalState {
        self.state
            .as_ref()
            .map(|data| data.state)
            .unwrap_or(ModalState::Closed)
    }

    pub fn is_open(&self) -> bool {
        self.state.is_some()
    }

    pub fn item(&self) -> Option<&CatalogItem> {
        self.state.as_ref().map(|data| &data.item)
    }

    pub fn toc(&self) -> &[TocEntry] {
        self.state.as_ref().map(|data| data.toc.as_slice()).unwrap_or(&[])
    }

    pub fn raw(&self) -> Option<&str> {
        self.state.as_ref().and_then(|data| data.raw.as_deref())
    }

    pub fn html(&self) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|data| data.doc.as_ref())
            .map(|doc| doc.html.as_str())
    }

    /// Front matter block, rendered as an always-available collapsible
    /// section above the body.
    pub fn front_matter(&self) -> Option<&str> {
        self.state
            .as_ref()
            .and_then(|data| data.doc.as_ref())
            .and_then(|doc| doc.front_matter.as_deref())
    }

    pub fn error(&self) -> Option<&str> {
        self.state.as_ref().and_then(|data| data.error.as_deref())
    }

    /// Link for viewing the source externally, shown alongside inline
    /// errors.
    pub fn external_link(&self) -> Option<&str> {
        self.item().map(|item| item.source_url.as_str())
    }

    pub fn active_section(&self) -> Option<&str> {
        self.state.as_ref().and_then(|data| data.active_section.as_deref())
    }

    pub fn view_mode(&self) -> ViewMode {
        match self.state() {
            ModalState::Source => ViewMode::Source,
            _ => ViewMode::Preview,
        }
    }

    /// Open the preview for `item` from any state. Returns the ticket the
    /// driver must complete with the fetched content.
    pub fn open(
        &mut self,
        item: &CatalogItem,
        section: Option<&str>,
        view: ViewMode,
    ) -> LoadTicket {
        self.token += 1;
        self.state = Some(ModalStateData {
            state: ModalState::Loading,
            item: item.clone(),
            requested_view: view,
            requested_section: section.map(str::to_string),
            raw: None,
            doc: None,
            toc: Vec::new(),
            active_section: None,
            error: None,
        });
        LoadTicket {
            token: self.token,
            url: item.source_url.clone(),
        }
    }

    /// Apply a fetch result. Returns the URL update to record, or None when
    /// the ticket is stale (a newer `open` superseded it) and the result was
    /// discarded.
    pub fn complete(
        &mut self,
        ticket: &LoadTicket,
        result: Result<String, String>,
        renderer: &dyn MarkdownRenderer,
    ) -> Option<UrlUpdate> {
        if ticket.token != self.token {
            return None;
        }
        let data = self.state.as_mut()?;
        if data.state != ModalState::Loading {
            return None;
        }

        match result {
            Ok(text) => {
                let doc = render_document(renderer, &text);
                let (annotated, html_toc) = toc::annotate_html(&doc.html);
                data.raw = Some(text);
                data.doc = Some(RenderedDoc {
                    front_matter: doc.front_matter,
                    html: annotated,
                });
                match data.requested_view {
                    ViewMode::Preview => {
                        data.state = ModalState::Preview;
                        data.toc = html_toc;
                    }
                    ViewMode::Source => {
                        data.state = ModalState::Source;
                        data.toc = toc::from_markdown(data.raw.as_deref().unwrap_or(""));
                    }
                }
                // A requested deep-link section survives only if it resolves.
                data.active_section = data
                    .requested_section
                    .take()
                    .filter(|section| data.toc.iter().any(|entry| entry.id == *section));
            }
            Err(message) => {
                data.state = ModalState::Error;
                data.error = Some(message);
            }
        }

        Some(UrlUpdate {
            item_id: data.item.id.clone(),
            view: match data.state {
                ModalState::Source => ViewMode::Source,
                _ => ViewMode::Preview,
            },
            section: data.active_section.clone(),
        })
    }

    /// Toggle between the rendered preview and the raw source. Free after the
    /// first load: both views are served from the snapshots taken at
    /// completion, never refetched. The TOC is regenerated for the active
    /// view and the section anchor is preserved when it still resolves.
    pub fn toggle_source_view(&mut self) -> Result<UrlUpdate, ModalError> {
        let data = self.state.as_mut().ok_or(ModalError::NotOpen)?;

        let (next_state, next_view) = match data.state {
            ModalState::Preview => (ModalState::Source, ViewMode::Source),
            ModalState::Source => (ModalState::Preview, ViewMode::Preview),
            _ => return Err(ModalError::NotOpen),
        };

        data.state = next_state;
        data.toc = match next_view {
            ViewMode::Source => toc::from_markdown(data.raw.as_deref().unwrap_or("")),
            ViewMode::Preview => data
                .doc
                .as_ref()
                .map(|doc| toc::from_html(&doc.html))
                .unwrap_or_default(),
        };
        data.active_section = data
            .active_section
            .take()
            .filter(|section| data.toc.iter().any(|entry| entry.id == *section));

        Ok(UrlUpdate {
            item_id: data.item.id.clone(),
            view: next_view,
            section: data.active_section.clone(),
        })
    }

    /// Close from any state, releasing scroll-spy state and the TOC. The
    /// caller clears the URL modal parameters.
    pub fn close(&mut self) {
        self.state = None;
    }

    /// Select a TOC entry: record it as the active section. The caller
    /// scrolls the heading into view and records the URL update.
    pub fn select_section(&mut self, section: &str) -> Result<UrlUpdate, ModalError> {
        let data = self.state.as_mut().ok_or(ModalError::NotOpen)?;
        data.active_section = Some(section.to_string());
        Ok(UrlUpdate {
            item_id: data.item.id.clone(),
            view: match data.state {
                ModalState::Source => ViewMode::Source,
                _ => ViewMode::Preview,
            },
            section: data.active_section.clone(),
        })
    }

    /// Scroll-spy update from the driver's (throttled) scroll events.
    pub fn update_scroll(
        &mut self,
        headings: &[HeadingOffset],
        scroll_top: f64,
        viewport_height: f64,
    ) {
        if let Some(data) = self.state.as_mut() {
            data.active_section =
                toc::active_section(headings, scroll_top, viewport_height).map(str::to_string);
        }
    }

    /// Resolve the adjacent item in the filtered list and reopen for it.
    /// Reopens in preview mode regardless of the current view.
    pub fn navigate_adjacent(
        &mut self,
        filtered: &[CatalogItem],
        direction: Direction,
    ) -> Result<LoadTicket, CatalogError> {
        let current = match self.item() {
            Some(item) => item.clone(),
            None => return Err(CatalogError::EmptyList),
        };
        let next = catalog::adjacent(filtered, &current, direction)?.clone();
        Ok(self.open(&next, None, ViewMode::Preview))
    }

    /// Modal title with the item's position in the filtered list.
    pub fn title(&self, filtered: &[CatalogItem]) -> Option<String> {
        let item = self.item()?;
        let position = catalog::position_of(filtered, item)
            .map(|(n, total)| format!(" ({} of {})", n, total))
            .unwrap_or_default();
        Some(format!("Preview: {}{}", item.title, position))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::render::CmarkRenderer;

    fn items() -> Vec<CatalogItem> {
        Catalog::from_json(
            r#"{"prompts": [
                {"title": "Alpha", "file": "alpha.prompt.md", "link": "p/alpha.prompt.md"},
                {"title": "Beta", "file": "beta.prompt.md", "link": "p/beta.prompt.md"}
            ]}"#,
        )
        .unwrap()
        .items()
        .to_vec()
    }

    const DOC: &str = "---\nmode: agent\n---\n# Alpha\n\n## Install\n\nBody\n";

    #[test]
    fn test_open_then_complete_reaches_preview() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], None, ViewMode::Preview);
        assert_eq!(modal.state(), ModalState::Loading);

        let update = modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer);
        assert_eq!(modal.state(), ModalState::Preview);
        assert_eq!(update.unwrap().item_id, "alpha");
        assert_eq!(modal.front_matter(), Some("mode: agent"));
        assert!(modal.html().unwrap().contains(r#"<h2 id="install">"#));
        assert_eq!(modal.toc().len(), 2);
    }

    #[test]
    fn test_stale_completion_is_discarded() {
        let mut modal = PreviewModal::new();
        let items = items();

        let first = modal.open(&items[0], None, ViewMode::Preview);
        let second = modal.open(&items[1], None, ViewMode::Preview);

        // The slower first response arrives after the second open.
        assert!(modal
            .complete(&first, Ok("# Stale Alpha\n".to_string()), &CmarkRenderer)
            .is_none());
        assert_eq!(modal.state(), ModalState::Loading);

        modal
            .complete(&second, Ok("# Beta\n".to_string()), &CmarkRenderer)
            .unwrap();
        assert_eq!(modal.item().unwrap().title, "Beta");
        assert!(modal.html().unwrap().contains("Beta"));
    }

    #[test]
    fn test_open_directly_in_source_view() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], None, ViewMode::Source);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        assert_eq!(modal.state(), ModalState::Source);
        // Source-view TOC comes from the raw markdown path.
        assert_eq!(modal.toc()[0].id, "alpha");
    }

    #[test]
    fn test_toggle_preserves_resolving_section() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], Some("install"), ViewMode::Preview);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        assert_eq!(modal.active_section(), Some("install"));

        let update = modal.toggle_source_view().unwrap();
        assert_eq!(modal.state(), ModalState::Source);
        assert_eq!(update.view, ViewMode::Source);
        assert_eq!(update.section.as_deref(), Some("install"));

        let update = modal.toggle_source_view().unwrap();
        assert_eq!(modal.state(), ModalState::Preview);
        assert_eq!(update.section.as_deref(), Some("install"));
    }

    #[test]
    fn test_unresolvable_deep_link_section_is_dropped() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], Some("nonexistent"), ViewMode::Preview);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        assert_eq!(modal.active_section(), None);
    }

    #[test]
    fn test_fetch_error_enters_error_state() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], None, ViewMode::Preview);
        modal
            .complete(&ticket, Err("HTTP 404".to_string()), &CmarkRenderer)
            .unwrap();
        assert_eq!(modal.state(), ModalState::Error);
        assert_eq!(modal.error(), Some("HTTP 404"));
        // The modal survives and still links to the external source.
        assert_eq!(modal.external_link(), Some("p/alpha.prompt.md"));
    }

    #[test]
    fn test_toggle_requires_loaded_content() {
        let mut modal = PreviewModal::new();
        assert!(matches!(modal.toggle_source_view(), Err(ModalError::NotOpen)));

        let items = items();
        modal.open(&items[0], None, ViewMode::Preview);
        // Still loading: toggling is rejected.
        assert!(matches!(modal.toggle_source_view(), Err(ModalError::NotOpen)));
    }

    #[test]
    fn test_close_releases_everything() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[0], None, ViewMode::Preview);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        modal.close();

        assert_eq!(modal.state(), ModalState::Closed);
        assert!(modal.toc().is_empty());
        assert!(modal.item().is_none());
    }

    #[test]
    fn test_navigate_adjacent_wraps_and_reopens_in_preview() {
        let mut modal = PreviewModal::new();
        let items = items();

        let ticket = modal.open(&items[1], None, ViewMode::Source);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();

        let ticket = modal.navigate_adjacent(&items, Direction::Next).unwrap();
        assert_eq!(modal.item().unwrap().title, "Alpha");
        assert_eq!(modal.state(), ModalState::Loading);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        assert_eq!(modal.state(), ModalState::Preview);
    }

    #[test]
    fn test_title_includes_position() {
        let mut modal = PreviewModal::new();
        let items = items();
        let ticket = modal.open(&items[1], None, ViewMode::Preview);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();
        assert_eq!(modal.title(&items).unwrap(), "Preview: Beta (2 of 2)");
    }

    #[test]
    fn test_scroll_spy_updates_active_section() {
        let mut modal = PreviewModal::new();
        let items = items();
        let ticket = modal.open(&items[0], None, ViewMode::Preview);
        modal.complete(&ticket, Ok(DOC.to_string()), &CmarkRenderer).unwrap();

        let headings = vec![
            HeadingOffset { id: "alpha".into(), offset: 0.0 },
            HeadingOffset { id: "install".into(), offset: 500.0 },
        ];
        modal.update_scroll(&headings, 500.0, 600.0);
        assert_eq!(modal.active_section(), Some("install"));
    }
}
