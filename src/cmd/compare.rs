//! `promptdeck compare` - unified diff of two catalog items.

use anyhow::Result;
use colored::Colorize;

use promptdeck::compare::compare_items;
use promptdeck::config::Config;
use promptdeck::content::{ContentCache, HttpFetcher};

pub fn run(config: &Config, id_a: &str, id_b: &str) -> Result<()> {
    let catalog = super::load_catalog(config)?;
    let fetcher = HttpFetcher::new(config.fetch_timeout());
    let mut cache = ContentCache::new();

    let bar = super::spinner("Fetching content...");
    let diff = compare_items(&catalog, &mut cache, &fetcher, id_a, id_b);
    bar.finish_and_clear();
    let diff = diff?;

    if diff.is_empty() {
        println!("Items are identical");
        return Ok(());
    }

    for line in diff.lines() {
        if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else {
            println!("{}", line);
        }
    }

    Ok(())
}
