//! In-memory implementation of ContentFetcher for testing.

use std::cell::RefCell;
use std::collections::HashMap;

use anyhow::Result;

use super::ContentFetcher;

/// Serves documents from a map and counts fetches, so tests can assert cache
/// behavior. Single-threaded by design, matching the browser's event loop.
#[derive(Default)]
pub struct InMemoryFetcher {
    documents: HashMap<String, String>,
    calls: RefCell<usize>,
}

impl InMemoryFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_documents(documents: Vec<(&str, &str)>) -> Self {
        Self {
            documents: documents
                .into_iter()
                .map(|(url, text)| (url.to_string(), text.to_string()))
                .collect(),
            calls: RefCell::new(0),
        }
    }

    pub fn insert(&mut self, url: &str, text: &str) {
        self.documents.insert(url.to_string(), text.to_string());
    }

    /// Number of fetch calls made so far.
    pub fn calls(&self) -> usize {
        *self.calls.borrow()
    }
}

impl ContentFetcher for InMemoryFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        *self.calls.borrow_mut() += 1;
        self.documents
            .get(url)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("No document at {}", url))
    }
}
