//! Deep-link fragment codec and navigable history.
//!
//! The modal's open item, view mode, and section anchor are encoded as
//! query-like parameters in the location fragment:
//! `#item=<id>&view=<preview|source>&section=<slug>`. History entries carry a
//! `modal_open` flag so back/forward can tell a modal entry from a plain
//! page entry without re-parsing.

use url::form_urlencoded;

use crate::preview::ViewMode;

/// Decoded fragment parameters. `item_id` gates modal auto-open; `view`
/// defaults to preview when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UrlState {
    pub item_id: Option<String>,
    pub view: ViewMode,
    pub section: Option<String>,
}

/// Encode modal parameters as a fragment (without the leading `#`).
pub fn encode_fragment(item_id: &str, view: ViewMode, section: Option<&str>) -> String {
    let mut serializer = form_urlencoded::Serializer::new(String::new());
    serializer.append_pair("item", item_id);
    serializer.append_pair("view", view.as_str());
    if let Some(section) = section {
        serializer.append_pair("section", section);
    }
    serializer.finish()
}

/// Decode a fragment, tolerating a leading `#`. Unknown parameters are
/// ignored; a missing `view` means preview.
pub fn parse_fragment(fragment: &str) -> UrlState {
    let fragment = fragment.strip_prefix('#').unwrap_or(fragment);

    let mut state = UrlState::default();
    for (key, value) in form_urlencoded::parse(fragment.as_bytes()) {
        match key.as_ref() {
            "item" => state.item_id = Some(value.into_owned()),
            "view" => state.view = ViewMode::parse(&value),
            "section" => state.section = Some(value.into_owned()),
            _ => {}
        }
    }
    state
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct HistoryEntry {
    fragment: String,
    modal_open: bool,
}

/// Event produced by back/forward traversal, mirroring a popstate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopEvent {
    pub modal_open: bool,
    pub state: UrlState,
}

/// In-memory navigable history. Pushing never reloads anything; it only
/// appends an entry, discarding any forward entries first, exactly like
/// `history.pushState`.
#[derive(Debug)]
pub struct HistoryStack {
    entries: Vec<HistoryEntry>,
    index: usize,
}

impl Default for HistoryStack {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStack {
    pub fn new() -> Self {
        Self {
            entries: vec![HistoryEntry {
                fragment: String::new(),
                modal_open: false,
            }],
            index: 0,
        }
    }

    fn push_entry(&mut self, entry: HistoryEntry) {
        self.entries.truncate(self.index + 1);
        self.entries.push(entry);
        self.index += 1;
    }

    /// Record an open modal.
    pub fn push(&mut self, item_id: &str, view: ViewMode, section: Option<&str>) {
        self.push_entry(HistoryEntry {
            fragment: encode_fragment(item_id, view, section),
            modal_open: true,
        });
    }

    /// Record that the modal closed: an entry with no modal parameters.
    pub fn clear(&mut self) {
        self.push_entry(HistoryEntry {
            fragment: String::new(),
            modal_open: false,
        });
    }

    /// Replace the current location without adding an entry, used to scrub
    /// an invalid deep link.
    pub fn replace_clear(&mut self) {
        self.entries[self.index] = HistoryEntry {
            fragment: String::new(),
            modal_open: false,
        };
    }

    pub fn current_fragment(&self) -> &str {
        &self.entries[self.index].fragment
    }

    /// Decode the current location's parameters.
    pub fn parse_current(&self) -> UrlState {
        parse_fragment(self.current_fragment())
    }

    pub fn back(&mut self) -> Option<PopEvent> {
        if self.index == 0 {
            return None;
        }
        self.index -= 1;
        Some(self.pop_event())
    }

    pub fn forward(&mut self) -> Option<PopEvent> {
        if self.index + 1 >= self.entries.len() {
            return None;
        }
        self.index += 1;
        Some(self.pop_event())
    }

    fn pop_event(&self) -> PopEvent {
        let entry = &self.entries[self.index];
        PopEvent {
            modal_open: entry.modal_open,
            state: parse_fragment(&entry.fragment),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fragment_round_trip() {
        let fragment = encode_fragment("rust-review", ViewMode::Source, Some("install"));
        let state = parse_fragment(&fragment);
        assert_eq!(state.item_id.as_deref(), Some("rust-review"));
        assert_eq!(state.view, ViewMode::Source);
        assert_eq!(state.section.as_deref(), Some("install"));
    }

    #[test]
    fn test_parse_tolerates_hash_and_defaults_view() {
        let state = parse_fragment("#item=alpha");
        assert_eq!(state.item_id.as_deref(), Some("alpha"));
        assert_eq!(state.view, ViewMode::Preview);
        assert_eq!(state.section, None);
    }

    #[test]
    fn test_parse_empty_fragment() {
        assert_eq!(parse_fragment(""), UrlState::default());
    }

    #[test]
    fn test_encode_escapes_special_characters() {
        let fragment = encode_fragment("a&b", ViewMode::Preview, Some("x y"));
        let state = parse_fragment(&fragment);
        assert_eq!(state.item_id.as_deref(), Some("a&b"));
        assert_eq!(state.section.as_deref(), Some("x y"));
    }

    #[test]
    fn test_history_push_and_parse_current() {
        let mut history = HistoryStack::new();
        history.push("alpha", ViewMode::Source, Some("install"));

        let state = history.parse_current();
        assert_eq!(state.item_id.as_deref(), Some("alpha"));
        assert_eq!(state.view, ViewMode::Source);
        assert_eq!(state.section.as_deref(), Some("install"));
    }

    #[test]
    fn test_back_and_forward_produce_pop_events() {
        let mut history = HistoryStack::new();
        history.push("alpha", ViewMode::Preview, None);
        history.clear();

        let pop = history.back().unwrap();
        assert!(pop.modal_open);
        assert_eq!(pop.state.item_id.as_deref(), Some("alpha"));

        let pop = history.back().unwrap();
        assert!(!pop.modal_open);
        assert_eq!(pop.state.item_id, None);

        assert!(history.back().is_none());

        let pop = history.forward().unwrap();
        assert!(pop.modal_open);
    }

    #[test]
    fn test_push_discards_forward_entries() {
        let mut history = HistoryStack::new();
        history.push("alpha", ViewMode::Preview, None);
        history.back();
        history.push("beta", ViewMode::Preview, None);

        assert!(history.forward().is_none());
        assert_eq!(history.parse_current().item_id.as_deref(), Some("beta"));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_replace_clear_scrubs_current_entry() {
        let mut history = HistoryStack::new();
        history.push("ghost", ViewMode::Preview, None);
        history.replace_clear();
        assert_eq!(history.parse_current(), UrlState::default());
        assert_eq!(history.len(), 2);
    }
}
