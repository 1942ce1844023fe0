//! Centralized UI formatting and color utilities for the CLI surface.

use colored::Colorize;

use crate::catalog::{CatalogItem, ItemType};

/// Check if quiet mode is enabled via environment variable or --quiet flag
pub fn is_quiet() -> bool {
    std::env::var("PROMPTDECK_QUIET")
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// Colored type badge for an item.
///
/// Badges:
/// - Prompt: 🎯 (cyan label)
/// - Instruction: 📋 (green label)
/// - Chat Mode: 💭 (magenta label)
pub fn type_badge(item_type: ItemType) -> String {
    let info = item_type.info();
    let label = match item_type {
        ItemType::Prompt => info.label.cyan(),
        ItemType::Instruction => info.label.green(),
        ItemType::ChatMode => info.label.magenta(),
    };
    format!("{} {}", info.badge, label)
}

/// One gallery card: badge, title, filename, and a trimmed description.
pub fn format_card(item: &CatalogItem, width: usize) -> String {
    let mut lines = vec![
        format!(
            "{}  {}",
            type_badge(item.item_type),
            colors::heading(&format::truncate_title(&item.title, width))
        ),
        format!("   {}", colors::secondary(&item.file)),
    ];
    if !item.description.is_empty() {
        lines.push(format!(
            "   {}",
            format::truncate_title(&item.description, width)
        ));
    }
    lines.join("\n")
}

/// Shown when a filter combination matches nothing.
pub fn empty_state(search_term: &str) -> String {
    if search_term.trim().is_empty() {
        "No items found.".to_string()
    } else {
        format!(
            "No items found matching \"{}\". Try a different search term or filter.",
            search_term.trim()
        )
    }
}

/// Color scheme for status-related text output
pub mod colors {
    use colored::{ColoredString, Colorize};

    /// Yellow for warnings
    pub fn warning(text: &str) -> ColoredString {
        text.yellow()
    }

    /// Cyan for identifiers (item ids, section slugs)
    pub fn identifier(text: &str) -> ColoredString {
        text.cyan()
    }

    /// Dimmed for secondary text
    pub fn secondary(text: &str) -> ColoredString {
        text.dimmed()
    }

    /// Bold for headings
    pub fn heading(text: &str) -> ColoredString {
        text.bold()
    }

    /// Color for markdown heading levels
    pub fn markdown_heading(text: &str, level: usize) -> ColoredString {
        match level {
            1 => text.bold(),
            2 => text.bold().cyan(),
            3 => text.bold().blue(),
            4 => text.bold().magenta(),
            _ => text.bold(),
        }
    }
}

/// Common text formatting patterns
pub mod format {
    /// Truncate a title to fit terminal width
    pub fn truncate_title(title: &str, max_len: usize) -> String {
        if title.chars().count() <= max_len {
            title.to_string()
        } else {
            let cut: String = title.chars().take(max_len.saturating_sub(3)).collect();
            format!("{}...", cut)
        }
    }

    /// Format a separator line for sections
    pub fn separator(width: usize) -> String {
        "─".repeat(width)
    }

    /// Indent a TOC entry by heading level, two spaces per level below h1.
    pub fn toc_indent(level: u8) -> String {
        "  ".repeat(level.saturating_sub(1) as usize)
    }
}
