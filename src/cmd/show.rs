//! `promptdeck show` - open one item's preview in the terminal.

use anyhow::{bail, Result};
use colored::Colorize;

use promptdeck::app::{Browser, DeepLink};
use promptdeck::config::Config;
use promptdeck::content::HttpFetcher;
use promptdeck::render::split_front_matter;
use promptdeck::ui;
use promptdeck::urlstate::encode_fragment;
use promptdeck::preview::ViewMode;

pub struct ShowArgs {
    pub id: String,
    pub source: bool,
    pub section: Option<String>,
    pub front_matter: bool,
    pub toc: bool,
}

pub fn run(config: &Config, args: &ShowArgs) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let mut browser = Browser::new(
        catalog,
        Box::new(HttpFetcher::new(config.fetch_timeout())),
        config.renderer.build(),
        config.pagination,
        config.page_size,
    );

    let view = if args.source {
        ViewMode::Source
    } else {
        ViewMode::Preview
    };
    let fragment = encode_fragment(&args.id, view, args.section.as_deref());

    let bar = super::spinner("Fetching content...");
    let outcome = browser.bootstrap(&fragment);
    bar.finish_and_clear();

    match outcome {
        DeepLink::Opened(_) => {}
        DeepLink::NotFound(id) => bail!("Item not found: {}", id),
        DeepLink::Deferred(_) => bail!("Catalog is empty: {}", config.catalog),
        DeepLink::Ignored => bail!("Item not found: {}", args.id),
    }

    let filtered = browser.filtered().to_vec();
    let modal = browser.modal();
    if let Some(title) = modal.title(&filtered) {
        println!("{}", ui::colors::heading(&title));
    }
    if let Some(item) = modal.item() {
        println!("{}", ui::type_badge(item.item_type));
        println!("{}", ui::colors::secondary(&item.source_url));
        if !item.install_url.is_empty() {
            println!("install: {}", ui::colors::secondary(&item.install_url));
        }
        if !item.install_url_insiders.is_empty() {
            println!("install (insiders): {}", ui::colors::secondary(&item.install_url_insiders));
        }
    }
    println!("{}", ui::format::separator(60).dimmed());

    if args.front_matter {
        if let Some(front_matter) = modal.front_matter() {
            for line in front_matter.lines() {
                println!("{}", line.dimmed());
            }
            println!("{}", ui::format::separator(60).dimmed());
        }
    }

    if args.toc {
        for entry in modal.toc() {
            println!(
                "{}{} {}",
                ui::format::toc_indent(entry.level),
                entry.text,
                ui::colors::identifier(&format!("#{}", entry.id))
            );
        }
        println!("{}", ui::format::separator(60).dimmed());
    }

    let raw = modal.raw().unwrap_or_default().to_string();
    if args.source {
        print!("{}", raw);
        if !raw.ends_with('\n') {
            println!();
        }
    } else {
        let (_, body) = split_front_matter(&raw);
        super::render::render_markdown(body);
    }

    if let Some(section) = args.section.as_deref() {
        match browser.modal().active_section() {
            Some(active) if active == section => {}
            _ => eprintln!(
                "{}",
                ui::colors::warning(&format!("Warning: section not found: {}", section))
            ),
        }
    }

    // Shareable deep link for this exact view.
    println!(
        "{}",
        format!("#{}", browser.history().current_fragment()).dimmed()
    );

    Ok(())
}
