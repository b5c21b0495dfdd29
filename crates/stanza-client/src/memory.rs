//! In-memory store and listing.
//!
//! Useful for exercising the pipeline without a server, and for callers that
//! already hold the collection in memory.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use crate::Result;
use crate::discovery::listing::{DirectoryListing, ListingEntry};
use crate::store::ContentStore;

/// A [`ContentStore`] backed by maps.
///
/// Documents are readable and probeable; assets are only probeable. Paths
/// marked as failing behave like an unreachable host.
#[derive(Debug, Default)]
pub struct MemoryStore {
    documents: HashMap<String, String>,
    assets: HashSet<String>,
    failing: HashSet<String>,
    probes: AtomicUsize,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a document.
    pub fn with_document(mut self, path: &str, text: &str) -> Self {
        self.documents.insert(key(path), text.to_string());
        self
    }

    /// Add an asset.
    pub fn with_asset(mut self, path: &str) -> Self {
        self.assets.insert(key(path));
        self
    }

    /// Make every request for `path` fail at the transport level.
    pub fn with_failure(mut self, path: &str) -> Self {
        self.failing.insert(key(path));
        self
    }

    /// Number of probes answered so far.
    pub fn probe_count(&self) -> usize {
        self.probes.load(Ordering::SeqCst)
    }
}

fn key(path: &str) -> String {
    path.trim_matches('/').to_string()
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let path = key(path);
        if self.failing.contains(&path) {
            return Err(stanza_core::Error::transport(path, "connection refused").into());
        }
        match self.documents.get(&path) {
            Some(text) => Ok(text.clone()),
            None => Err(stanza_core::Error::http(404, path).into()),
        }
    }

    async fn probe(&self, path: &str) -> Result<bool> {
        self.probes.fetch_add(1, Ordering::SeqCst);
        let path = key(path);
        if self.failing.contains(&path) {
            return Err(stanza_core::Error::transport(path, "connection refused").into());
        }
        Ok(self.assets.contains(&path) || self.documents.contains_key(&path))
    }
}

/// A [`DirectoryListing`] backed by a map from root to entries.
///
/// Roots that were never added answer 404, like a listing API asked for a
/// directory that does not exist.
#[derive(Debug, Default)]
pub struct MemoryListing {
    roots: HashMap<String, Vec<ListingEntry>>,
    failing: HashSet<String>,
}

impl MemoryListing {
    /// Create an empty listing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the entries of a root.
    pub fn with_root(mut self, root: &str, entries: Vec<ListingEntry>) -> Self {
        self.roots.insert(key(root), entries);
        self
    }

    /// Make listing `root` fail at the transport level.
    pub fn with_failure(mut self, root: &str) -> Self {
        self.failing.insert(key(root));
        self
    }
}

#[async_trait]
impl DirectoryListing for MemoryListing {
    async fn list(&self, root: &str) -> Result<Vec<ListingEntry>> {
        let root = key(root);
        if self.failing.contains(&root) {
            return Err(stanza_core::Error::transport(root, "connection refused").into());
        }
        match self.roots.get(&root) {
            Some(entries) => Ok(entries.clone()),
            None => Err(stanza_core::Error::http(404, root).into()),
        }
    }
}
