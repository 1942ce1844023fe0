//! Configuration loading for the browser and CLI.
//!
//! Config lives in the YAML front matter of a `config.md`, so the file can
//! carry human-readable notes in its body. Merge order (later overrides
//! earlier): built-in defaults, then the global config at
//! `<config dir>/promptdeck/config.md`, then the project-local
//! `.promptdeck/config.md`. Every field is optional.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pagination::PaginationMode;
use crate::render::{split_front_matter, BasicRenderer, CmarkRenderer, MarkdownRenderer};

pub const LOCAL_CONFIG_PATH: &str = ".promptdeck/config.md";

const DEFAULT_CATALOG: &str = "data.json";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_PAGE_SIZE: usize = 12;

/// Markdown engine selection. `basic` is the regex fallback renderer,
/// exposed mostly for troubleshooting rendering differences.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RendererKind {
    #[default]
    Cmark,
    Basic,
}

impl RendererKind {
    pub fn build(&self) -> Box<dyn MarkdownRenderer> {
        match self {
            RendererKind::Cmark => Box::new(CmarkRenderer),
            RendererKind::Basic => Box::new(BasicRenderer::new()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Path or URL of the catalog payload.
    pub catalog: String,
    pub fetch_timeout_secs: u64,
    pub page_size: usize,
    pub pagination: PaginationMode,
    pub renderer: RendererKind,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog: DEFAULT_CATALOG.to_string(),
            fetch_timeout_secs: DEFAULT_TIMEOUT_SECS,
            page_size: DEFAULT_PAGE_SIZE,
            pagination: PaginationMode::Paged,
            renderer: RendererKind::default(),
        }
    }
}

/// On-disk shape: every field optional so partial files merge cleanly.
#[derive(Debug, Default, Deserialize)]
struct PartialConfig {
    catalog: Option<String>,
    fetch_timeout_secs: Option<u64>,
    page_size: Option<usize>,
    pagination: Option<PaginationMode>,
    renderer: Option<RendererKind>,
}

impl PartialConfig {
    fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        Self::parse(&content)
    }

    fn parse(content: &str) -> Result<Self> {
        let (front_matter, _body) = split_front_matter(content);
        let front_matter = front_matter.context("Config file has no front matter block")?;
        serde_yaml::from_str(&front_matter).context("Failed to parse config front matter")
    }

    fn apply(self, config: &mut Config) {
        if let Some(catalog) = self.catalog {
            config.catalog = catalog;
        }
        if let Some(secs) = self.fetch_timeout_secs {
            config.fetch_timeout_secs = secs;
        }
        if let Some(size) = self.page_size {
            config.page_size = size.max(1);
        }
        if let Some(mode) = self.pagination {
            config.pagination = mode;
        }
        if let Some(renderer) = self.renderer {
            config.renderer = renderer;
        }
    }
}

impl Config {
    /// Load with full merge semantics: defaults, then global, then local.
    /// Missing files are fine; malformed files are errors.
    pub fn load() -> Result<Self> {
        Self::load_merged_from(global_config_path().as_deref(), Path::new(LOCAL_CONFIG_PATH))
    }

    pub fn load_merged_from(global_path: Option<&Path>, local_path: &Path) -> Result<Self> {
        let mut config = Config::default();

        if let Some(path) = global_path.filter(|p| p.exists()) {
            PartialConfig::load_from(path)?.apply(&mut config);
        }
        if local_path.exists() {
            PartialConfig::load_from(local_path)?.apply(&mut config);
        }

        Ok(config)
    }

    pub fn parse(content: &str) -> Result<Self> {
        let mut config = Config::default();
        PartialConfig::parse(content)?.apply(&mut config);
        Ok(config)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }
}

/// `~/.config/promptdeck/config.md` (platform equivalent).
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("promptdeck").join("config.md"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_overrides_defaults() {
        let config = Config::parse(
            "---\npage_size: 24\npagination: infinite\nrenderer: basic\n---\n\nNotes.\n",
        )
        .unwrap();
        assert_eq!(config.page_size, 24);
        assert_eq!(config.pagination, PaginationMode::Infinite);
        assert_eq!(config.renderer, RendererKind::Basic);
        // Untouched fields keep their defaults.
        assert_eq!(config.catalog, "data.json");
        assert_eq!(config.fetch_timeout_secs, 10);
    }

    #[test]
    fn test_parse_requires_front_matter() {
        assert!(Config::parse("just a markdown body\n").is_err());
    }

    #[test]
    fn test_parse_rejects_unknown_pagination() {
        assert!(Config::parse("---\npagination: sideways\n---\n").is_err());
    }

    #[test]
    fn test_page_size_floor() {
        let config = Config::parse("---\npage_size: 0\n---\n").unwrap();
        assert_eq!(config.page_size, 1);
    }

    #[test]
    fn test_local_overrides_global() {
        let dir = tempfile::tempdir().unwrap();
        let global = dir.path().join("global.md");
        let local = dir.path().join("local.md");

        let mut f = fs::File::create(&global).unwrap();
        writeln!(f, "---\npage_size: 5\ncatalog: global.json\n---").unwrap();
        let mut f = fs::File::create(&local).unwrap();
        writeln!(f, "---\ncatalog: local.json\n---").unwrap();

        let config = Config::load_merged_from(Some(&global), &local).unwrap();
        assert_eq!(config.catalog, "local.json");
        assert_eq!(config.page_size, 5);
    }

    #[test]
    fn test_missing_files_yield_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config =
            Config::load_merged_from(Some(&dir.path().join("nope.md")), &dir.path().join("also.md"))
                .unwrap();
        assert_eq!(config.page_size, 12);
    }
}
