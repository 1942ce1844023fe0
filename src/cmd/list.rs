//! `promptdeck list` - browse the catalog from the terminal.

use anyhow::{bail, Result};
use colored::Colorize;

use promptdeck::catalog::{filter, FilterState, TypeFilter};
use promptdeck::config::Config;
use promptdeck::pagination::{PaginationController, PaginationMode};
use promptdeck::ui;

pub struct ListArgs {
    pub search: String,
    pub item_type: Option<String>,
    pub page: usize,
    pub page_size: Option<usize>,
    pub all: bool,
    pub count: bool,
}

pub fn run(config: &Config, args: &ListArgs) -> Result<()> {
    let selected_type = match args.item_type.as_deref() {
        None => TypeFilter::All,
        Some(value) => match TypeFilter::parse(value) {
            Some(parsed) => parsed,
            None => bail!(
                "Unknown type filter: {} (expected all, prompts, instructions, or chatmodes)",
                value
            ),
        },
    };

    let catalog = super::load_catalog(config)?;
    let state = FilterState::new(args.search.clone(), selected_type);
    let filtered = filter(catalog.items(), &state);

    if args.count {
        println!("{}", filtered.len());
        return Ok(());
    }

    if filtered.is_empty() {
        println!("{}", ui::empty_state(&state.search_term));
        return Ok(());
    }

    let page_size = if args.all {
        filtered.len()
    } else {
        args.page_size.unwrap_or(config.page_size)
    };
    let mut pages = PaginationController::new(PaginationMode::Paged, page_size);
    pages.go_to(args.page, filtered.len());

    for item in pages.visible_slice(&filtered) {
        println!("{}", ui::format_card(item, 72));
        println!();
    }

    let shown = pages.visible_slice(&filtered).len();
    let stats = match state.summary() {
        Some(summary) => format!("Showing {} of {} items ({})", shown, catalog.len(), summary),
        None => format!("Showing {} of {} items", shown, catalog.len()),
    };
    println!("{}", stats.dimmed());
    if pages.total_pages(filtered.len()) > 1 {
        println!(
            "{}",
            format!(
                "Page {} of {}",
                pages.current_page(),
                pages.total_pages(filtered.len())
            )
            .dimmed()
        );
    }

    Ok(())
}
