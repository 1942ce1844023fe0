//! Catalog loading, lookup, and adjacency for curated markdown items.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

pub mod filter;

pub use filter::{filter, FilterState, TypeFilter};

/// Kind of catalog entry, tagged from the payload collection it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ItemType {
    #[serde(rename = "prompts")]
    Prompt,
    #[serde(rename = "instructions")]
    Instruction,
    #[serde(rename = "chatmodes")]
    ChatMode,
}

/// Display metadata for an item type.
pub struct TypeInfo {
    pub badge: &'static str,
    pub label: &'static str,
    /// Filename suffix that identifies this type, e.g. `.prompt.md`.
    pub suffix: &'static str,
}

impl ItemType {
    pub fn info(&self) -> TypeInfo {
        match self {
            ItemType::Prompt => TypeInfo {
                badge: "🎯",
                label: "Prompt",
                suffix: ".prompt.md",
            },
            ItemType::Instruction => TypeInfo {
                badge: "📋",
                label: "Instruction",
                suffix: ".instructions.md",
            },
            ItemType::ChatMode => TypeInfo {
                badge: "💭",
                label: "Chat Mode",
                suffix: ".chatmode.md",
            },
        }
    }

    pub fn all() -> [ItemType; 3] {
        [ItemType::Prompt, ItemType::Instruction, ItemType::ChatMode]
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().label)
    }
}

/// One catalog entry. Immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable identity for deep links: `file` with its type suffix stripped.
    pub id: String,
    pub title: String,
    pub description: String,
    pub item_type: ItemType,
    pub file: String,
    pub link: String,
    pub source_url: String,
    pub install_url: String,
    pub install_url_insiders: String,
}

impl CatalogItem {
    /// Identity comparison used for adjacency lookups. Items loaded from the
    /// payload are compared by content, not by reference.
    pub fn same_identity(&self, other: &CatalogItem) -> bool {
        self.title == other.title && self.file == other.file && self.item_type == other.item_type
    }
}

/// Wire shape of one item in `data.json`.
#[derive(Debug, Deserialize)]
struct RawItem {
    title: String,
    #[serde(default)]
    description: String,
    file: String,
    #[serde(default)]
    link: String,
    #[serde(default, rename = "vscodeUrl", alias = "installUrl")]
    vscode_url: String,
    #[serde(default, rename = "insidersUrl", alias = "installUrlSecondary")]
    insiders_url: String,
    #[serde(default, rename = "sourceUrl")]
    source_url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawPayload {
    #[serde(default)]
    prompts: Vec<RawItem>,
    #[serde(default)]
    instructions: Vec<RawItem>,
    #[serde(default)]
    chatmodes: Vec<RawItem>,
}

#[derive(Debug)]
pub enum CatalogError {
    MalformedCatalog(String),
    ItemNotFound(String),
    EmptyList,
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::MalformedCatalog(msg) => write!(f, "Malformed catalog: {}", msg),
            CatalogError::ItemNotFound(id) => write!(f, "Item not found: {}", id),
            CatalogError::EmptyList => write!(f, "Filtered list is empty"),
        }
    }
}

impl std::error::Error for CatalogError {}

/// Direction for adjacent-item navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Next,
    Previous,
}

/// The combined, flattened item catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

/// Strip the type suffix from a filename to obtain the stable item id.
/// Falls back to stripping a plain `.md` extension for files that do not
/// carry the expected suffix.
fn item_id(file: &str, item_type: ItemType) -> String {
    let suffix = item_type.info().suffix;
    if let Some(stem) = file.strip_suffix(suffix) {
        stem.to_string()
    } else {
        file.strip_suffix(".md").unwrap_or(file).to_string()
    }
}

impl Catalog {
    /// Parse a catalog from the raw `data.json` text.
    pub fn from_json(text: &str) -> Result<Self, CatalogError> {
        let value: serde_json::Value = serde_json::from_str(text)
            .map_err(|e| CatalogError::MalformedCatalog(e.to_string()))?;
        Self::from_payload(value)
    }

    /// Flatten the three typed collections into one list, tagging each item
    /// with its type. Missing collections are treated as empty, but a payload
    /// that is not a JSON object is fatal.
    pub fn from_payload(value: serde_json::Value) -> Result<Self, CatalogError> {
        if !value.is_object() {
            return Err(CatalogError::MalformedCatalog(
                "expected an object with prompts/instructions/chatmodes keys".to_string(),
            ));
        }

        let raw: RawPayload = serde_json::from_value(value)
            .map_err(|e| CatalogError::MalformedCatalog(e.to_string()))?;

        let mut items = Vec::new();
        for (collection, item_type) in [
            (raw.prompts, ItemType::Prompt),
            (raw.instructions, ItemType::Instruction),
            (raw.chatmodes, ItemType::ChatMode),
        ] {
            for entry in collection {
                // Source URL is synthesized from the repo-relative link when
                // the payload omits it.
                let source_url = entry
                    .source_url
                    .filter(|s| !s.is_empty())
                    .unwrap_or_else(|| entry.link.clone());
                items.push(CatalogItem {
                    id: item_id(&entry.file, item_type),
                    title: entry.title,
                    description: entry.description,
                    item_type,
                    file: entry.file,
                    link: entry.link,
                    source_url,
                    install_url: entry.vscode_url,
                    install_url_insiders: entry.insiders_url,
                });
            }
        }

        // Ids must be unique across the combined catalog so deep links
        // resolve to exactly one item.
        let mut seen = HashSet::new();
        for item in &items {
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::MalformedCatalog(format!(
                    "duplicate item id: {}",
                    item.id
                )));
            }
        }

        Ok(Self { items })
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Look up an item by its stable id.
    pub fn find_by_id(&self, id: &str) -> Result<&CatalogItem, CatalogError> {
        self.items
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| CatalogError::ItemNotFound(id.to_string()))
    }
}

/// Find the item adjacent to `current` in `filtered`, wrapping around both
/// ends. If `current` is no longer in the list (the filter changed under an
/// open preview), navigation restarts from the first item.
pub fn adjacent<'a>(
    filtered: &'a [CatalogItem],
    current: &CatalogItem,
    direction: Direction,
) -> Result<&'a CatalogItem, CatalogError> {
    if filtered.is_empty() {
        return Err(CatalogError::EmptyList);
    }

    let index = filtered.iter().position(|item| item.same_identity(current));
    let index = match index {
        Some(i) => i,
        None => return Ok(&filtered[0]),
    };

    let next = match direction {
        Direction::Next => (index + 1) % filtered.len(),
        Direction::Previous => (index + filtered.len() - 1) % filtered.len(),
    };

    Ok(&filtered[next])
}

/// 1-based position of `item` within `filtered`, for `(N of M)` display.
pub fn position_of(filtered: &[CatalogItem], item: &CatalogItem) -> Option<(usize, usize)> {
    filtered
        .iter()
        .position(|candidate| candidate.same_identity(item))
        .map(|i| (i + 1, filtered.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn payload() -> serde_json::Value {
        serde_json::json!({
            "prompts": [
                {"title": "Rust Review", "description": "Review Rust code", "file": "rust-review.prompt.md", "link": "prompts/rust-review.prompt.md"},
            ],
            "instructions": [
                {"title": "Angular", "description": "", "file": "angular.instructions.md", "link": "instructions/angular.instructions.md", "sourceUrl": "https://github.com/example/repo/blob/main/instructions/angular.instructions.md"},
            ],
            "chatmodes": [
                {"title": "Planner", "description": "Planning mode", "file": "planner.chatmode.md", "link": "chatmodes/planner.chatmode.md"},
            ]
        })
    }

    #[test]
    fn test_from_payload_flattens_and_tags() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.items()[0].item_type, ItemType::Prompt);
        assert_eq!(catalog.items()[1].item_type, ItemType::Instruction);
        assert_eq!(catalog.items()[2].item_type, ItemType::ChatMode);
    }

    #[test]
    fn test_item_id_strips_type_suffix() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        assert_eq!(catalog.items()[0].id, "rust-review");
        assert_eq!(catalog.items()[1].id, "angular");
        assert_eq!(catalog.items()[2].id, "planner");
    }

    #[test]
    fn test_source_url_synthesized_from_link() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        assert_eq!(catalog.items()[0].source_url, "prompts/rust-review.prompt.md");
        assert!(catalog.items()[1].source_url.starts_with("https://github.com/"));
    }

    #[test]
    fn test_missing_collections_are_empty() {
        let catalog = Catalog::from_json(r#"{"prompts": []}"#).unwrap();
        assert!(catalog.is_empty());
    }

    #[test]
    fn test_non_object_payload_is_malformed() {
        let err = Catalog::from_json("[1, 2, 3]").unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog(_)));
    }

    #[test]
    fn test_duplicate_ids_are_malformed() {
        let err = Catalog::from_json(
            r#"{"prompts": [
                {"title": "A", "file": "dup.prompt.md", "link": "a"},
                {"title": "B", "file": "dup.prompt.md", "link": "b"}
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedCatalog(_)));
    }

    #[test]
    fn test_find_by_id() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        assert_eq!(catalog.find_by_id("planner").unwrap().title, "Planner");
        assert!(matches!(
            catalog.find_by_id("missing"),
            Err(CatalogError::ItemNotFound(_))
        ));
    }

    #[test]
    fn test_adjacent_wraps_both_ends() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        let items = catalog.items().to_vec();
        let last = items.last().unwrap();
        let first = items.first().unwrap();

        let wrapped = adjacent(&items, last, Direction::Next).unwrap();
        assert!(wrapped.same_identity(first));

        let wrapped = adjacent(&items, first, Direction::Previous).unwrap();
        assert!(wrapped.same_identity(last));
    }

    #[test]
    fn test_adjacent_empty_list() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        let item = catalog.items()[0].clone();
        assert!(matches!(
            adjacent(&[], &item, Direction::Next),
            Err(CatalogError::EmptyList)
        ));
    }

    #[test]
    fn test_position_of() {
        let catalog = Catalog::from_payload(payload()).unwrap();
        let items = catalog.items().to_vec();
        assert_eq!(position_of(&items, &items[1]), Some((2, 3)));
    }
}
