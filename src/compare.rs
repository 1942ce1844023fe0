//! Side-by-side comparison of two catalog documents.

use anyhow::{bail, Result};
use similar::TextDiff;

use crate::catalog::Catalog;
use crate::content::{ContentCache, ContentFetcher};

/// Produce a unified diff between two documents.
pub fn unified_diff(name_a: &str, name_b: &str, text_a: &str, text_b: &str) -> String {
    TextDiff::from_lines(text_a, text_b)
        .unified_diff()
        .context_radius(3)
        .header(name_a, name_b)
        .to_string()
}

/// Resolve two item ids, fetch both documents through the cache, and diff
/// them. Exactly two distinct items are required.
pub fn compare_items(
    catalog: &Catalog,
    cache: &mut ContentCache,
    fetcher: &dyn ContentFetcher,
    id_a: &str,
    id_b: &str,
) -> Result<String> {
    if id_a == id_b {
        bail!("Select two different items to compare");
    }
    let item_a = catalog.find_by_id(id_a)?.clone();
    let item_b = catalog.find_by_id(id_b)?.clone();

    let text_a = cache.fetch(fetcher, &item_a.source_url);
    let text_b = cache.fetch(fetcher, &item_b.source_url);

    Ok(unified_diff(&item_a.file, &item_b.file, &text_a, &text_b))
}
