//! Raw markdown content retrieval.
//!
//! The cache sits in front of a [`ContentFetcher`], so the HTTP client can be
//! swapped for an in-memory table in tests.

use std::time::Duration;

use anyhow::{Context, Result};

pub mod cache;
pub mod in_memory;

pub use cache::{normalize_raw_url, ContentCache};
pub use in_memory::InMemoryFetcher;

/// A source of raw markdown text, keyed by URL.
pub trait ContentFetcher {
    /// Fetch the document at `url`. Non-2xx responses and transport errors
    /// are both plain errors; recovery policy belongs to the cache.
    fn fetch(&self, url: &str) -> Result<String>;
}

/// HTTP implementation backed by ureq.
pub struct HttpFetcher {
    agent: ureq::Agent,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout_connect(timeout)
            .timeout(timeout)
            .build();
        Self { agent }
    }
}

impl ContentFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        let response = self
            .agent
            .get(url)
            .call()
            .with_context(|| format!("Failed to fetch {}", url))?;
        response
            .into_string()
            .with_context(|| format!("Failed to read body from {}", url))
    }
}

/// First lines of a document for tooltip previews: front matter stripped,
/// at most 8 lines and 300 characters, with an ellipsis when truncated.
pub fn excerpt(content: &str) -> String {
    let (_, body) = crate::render::split_front_matter(content);
    let lines: Vec<&str> = body.lines().collect();
    let head = lines[..lines.len().min(8)].join("\n");
    let mut preview: String = head.chars().take(300).collect();
    let truncated = preview.len() < head.len() || lines.len() > 8;
    if truncated {
        preview.push_str("...");
    }
    preview
}
