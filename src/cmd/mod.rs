//! Command module structure for the promptdeck CLI

use std::fs;
use std::time::Duration;

use anyhow::{Context, Result};
use indicatif::ProgressBar;

use promptdeck::catalog::Catalog;
use promptdeck::config::Config;
use promptdeck::content::{ContentFetcher, HttpFetcher};

pub mod compare;
pub mod list;
pub mod render;
pub mod show;
pub mod toc;

/// Load the catalog payload from the configured path or URL.
pub fn load_catalog(config: &Config) -> Result<Catalog> {
    let source = config.catalog.as_str();
    let text = if source.starts_with("http://") || source.starts_with("https://") {
        HttpFetcher::new(config.fetch_timeout())
            .fetch(source)
            .with_context(|| format!("Failed to fetch catalog from {}", source))?
    } else {
        fs::read_to_string(source)
            .with_context(|| format!("Failed to read catalog from {}", source))?
    };
    let catalog = Catalog::from_json(&text)?;
    Ok(catalog)
}

/// Spinner shown while content is being fetched. Hidden in quiet mode and
/// when stderr is not a terminal.
pub fn spinner(message: &str) -> ProgressBar {
    if promptdeck::ui::is_quiet() || !atty::is(atty::Stream::Stderr) {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new_spinner();
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}
