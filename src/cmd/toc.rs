//! `promptdeck toc` - print an item's table of contents.

use anyhow::Result;

use promptdeck::config::Config;
use promptdeck::content::{ContentCache, HttpFetcher};
use promptdeck::render::{render_document, split_front_matter};
use promptdeck::toc::{annotate_html, from_markdown};
use promptdeck::ui;

pub fn run(config: &Config, id: &str, source: bool) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let item = catalog.find_by_id(id)?.clone();

    let fetcher = HttpFetcher::new(config.fetch_timeout());
    let mut cache = ContentCache::new();

    let bar = super::spinner("Fetching content...");
    let text = cache.fetch(&fetcher, &item.source_url);
    bar.finish_and_clear();

    // The source path scans the raw markdown; the default path extracts
    // headings from the rendered HTML, exactly as the preview does. Both
    // produce identical ids for identical headings.
    let entries = if source {
        let (_, body) = split_front_matter(&text);
        from_markdown(body)
    } else {
        let doc = render_document(config.renderer.build().as_ref(), &text);
        annotate_html(&doc.html).1
    };

    if entries.is_empty() {
        println!("No headings in {}", item.file);
        return Ok(());
    }

    println!("{}", ui::colors::heading(&item.title));
    for entry in &entries {
        println!(
            "{}{} {}",
            ui::format::toc_indent(entry.level),
            entry.text,
            ui::colors::identifier(&format!("#{}", entry.id))
        );
    }

    Ok(())
}
