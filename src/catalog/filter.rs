//! Filtering and sorting of the combined catalog.
//!
//! `filter` is a pure function: identical inputs always produce identical
//! output, which is what makes the browser's list state testable.

use super::{CatalogItem, ItemType};

/// Type facet of the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(ItemType),
}

impl TypeFilter {
    /// Parse the filter value as it appears in the UI/CLI
    /// (`all`, `prompts`, `instructions`, `chatmodes`).
    pub fn parse(value: &str) -> Option<TypeFilter> {
        match value {
            "all" => Some(TypeFilter::All),
            "prompts" => Some(TypeFilter::Only(ItemType::Prompt)),
            "instructions" => Some(TypeFilter::Only(ItemType::Instruction)),
            "chatmodes" => Some(TypeFilter::Only(ItemType::ChatMode)),
            _ => None,
        }
    }

    fn matches(&self, item: &CatalogItem) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Only(item_type) => item.item_type == *item_type,
        }
    }
}

/// Current search and type selection.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub search_term: String,
    pub selected_type: TypeFilter,
}

impl FilterState {
    pub fn new(search_term: impl Into<String>, selected_type: TypeFilter) -> Self {
        Self {
            search_term: search_term.into(),
            selected_type,
        }
    }

    /// Human-readable summary of active filters, for the stats line.
    pub fn summary(&self) -> Option<String> {
        let mut parts = Vec::new();
        let term = self.search_term.trim();
        if !term.is_empty() {
            parts.push(format!("search: \"{}\"", term));
        }
        if let TypeFilter::Only(item_type) = self.selected_type {
            parts.push(format!("type: {}", item_type.info().label.to_lowercase()));
        }
        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Key used for the title sort. Unicode-aware lowercasing gives a stable,
/// total order that matches case-insensitive locale comparison for the
/// ASCII-dominated corpus.
fn title_key(item: &CatalogItem) -> String {
    item.title.to_lowercase()
}

/// Filter by type membership, then by case-insensitive substring match
/// against title, description, and filename, then sort ascending by title.
/// Recomputed from scratch on every filter-state change; no incremental
/// diffing.
pub fn filter(items: &[CatalogItem], state: &FilterState) -> Vec<CatalogItem> {
    let term = state.search_term.trim().to_lowercase();

    let mut matched: Vec<CatalogItem> = items
        .iter()
        .filter(|item| state.selected_type.matches(item))
        .filter(|item| {
            term.is_empty()
                || item.title.to_lowercase().contains(&term)
                || item.description.to_lowercase().contains(&term)
                || item.file.to_lowercase().contains(&term)
        })
        .cloned()
        .collect();

    matched.sort_by(|a, b| title_key(a).cmp(&title_key(b)));
    matched
}
