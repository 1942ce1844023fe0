//! Session-lifetime memoization of fetched markdown, with fallback content.

use std::collections::HashMap;

use url::Url;

use super::ContentFetcher;

/// Rewrite a GitHub blob URL to its raw-content equivalent: substitute the
/// host and drop the `/blob/` path segment. Anything else passes through
/// unchanged.
pub fn normalize_raw_url(source_url: &str) -> String {
    if let Ok(mut parsed) = Url::parse(source_url) {
        if parsed.host_str() == Some("github.com") && parsed.path().contains("/blob/") {
            let path = parsed.path().replacen("/blob/", "/", 1);
            parsed.set_path(&path);
            if parsed.set_host(Some("raw.githubusercontent.com")).is_ok() {
                return parsed.to_string();
            }
        }
    }
    source_url.to_string()
}

/// Memoizes fetched text by normalized URL. Entries never expire within a
/// session; the corpus is small and bounded, so unbounded growth is fine.
#[derive(Debug, Default)]
pub struct ContentCache {
    entries: HashMap<String, String>,
}

impl ContentCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the document for `source_url`, fetching it on a cache miss.
    ///
    /// Fetch failures are non-fatal by design: this is preview content, so
    /// any failure substitutes a deterministically generated sample document
    /// instead of propagating the error. The result, fetched or generated,
    /// is cached before returning.
    pub fn fetch(&mut self, fetcher: &dyn ContentFetcher, source_url: &str) -> String {
        let raw_url = normalize_raw_url(source_url);

        if let Some(hit) = self.entries.get(&raw_url) {
            return hit.clone();
        }

        let text = fetcher
            .fetch(&raw_url)
            .unwrap_or_else(|_| sample_document(source_url));

        self.entries.insert(raw_url, text.clone());
        text
    }

    pub fn contains(&self, source_url: &str) -> bool {
        self.entries.contains_key(&normalize_raw_url(source_url))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Deterministic placeholder shown when the raw content cannot be fetched.
/// Derives a front matter block and heading from the filename and marks the
/// body as sample content.
pub fn sample_document(source_url: &str) -> String {
    let filename = source_url.rsplit('/').next().unwrap_or(source_url);

    let kind = if filename.contains(".prompt.") {
        "prompt"
    } else if filename.contains(".instructions.") {
        "instruction"
    } else if filename.contains(".chatmode.") {
        "chat mode"
    } else {
        "template"
    };

    let stem = filename
        .strip_suffix(".prompt.md")
        .or_else(|| filename.strip_suffix(".instructions.md"))
        .or_else(|| filename.strip_suffix(".chatmode.md"))
        .or_else(|| filename.strip_suffix(".md"))
        .unwrap_or(filename);
    let title: String = stem
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect();

    format!(
        "---\ndescription: 'Sample {kind} for preview demonstration'\nmode: 'agent'\n---\n\n\
# {title}\n\n\
This is a sample {kind} demonstrating the preview functionality. In a live \
environment, this would show the actual content from the source repository.\n\n\
## Usage\n\n\
```markdown\nThis {kind} would contain specific instructions or content\nfor your development workflow.\n```\n\n\
## Example Content\n\n\
- Step-by-step guidance\n\
- Best practices\n\
- Practical code examples\n\n\
> Note: this is preview content only. The actual {kind} contains \
domain-specific instructions and examples.\n"
    )
}
