//! Legacy layout: category directories holding one document file per poem.

use stanza_core::ContentLocator;
use stanza_core::util::paths::{extension, join_site_path};

use super::DiscoveryStrategy;
use super::fallback;
use super::listing::{EntryKind, ListingEntry};
use crate::config::{DiscoveryConfig, Layout};

/// Discovers document files directly under category roots.
#[derive(Debug, Clone)]
pub struct LegacyStrategy {
    roots: Vec<String>,
    extensions: Vec<String>,
    fallback: Vec<String>,
}

impl LegacyStrategy {
    /// Create a strategy. Extensions match case-insensitively; an empty
    /// `fallback` selects the built-in list.
    pub fn new(roots: Vec<String>, extensions: &[String], fallback: Vec<String>) -> Self {
        Self {
            roots,
            extensions: extensions
                .iter()
                .map(|e| e.trim_start_matches('.').to_ascii_lowercase())
                .collect(),
            fallback,
        }
    }

    /// Build from the `[discovery]` config section.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            config.effective_roots(),
            &config.content_extensions,
            config.fallback.clone(),
        )
    }

    fn is_content_file(&self, name: &str) -> bool {
        extension(name)
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

impl DiscoveryStrategy for LegacyStrategy {
    fn layout(&self) -> Layout {
        Layout::Legacy
    }

    fn roots(&self) -> &[String] {
        &self.roots
    }

    fn select(&self, root: &str, entries: &[ListingEntry]) -> Vec<ContentLocator> {
        let mut names: Vec<&str> = entries
            .iter()
            .filter(|e| e.kind == EntryKind::File && self.is_content_file(&e.name))
            .map(|e| e.name.as_str())
            .collect();
        names.sort_unstable();

        names
            .into_iter()
            .map(|name| ContentLocator::from_document(&join_site_path("", &[root, name])))
            .collect()
    }

    fn fallback(&self) -> Vec<ContentLocator> {
        let documents = if self.fallback.is_empty() {
            fallback::legacy_documents()
        } else {
            self.fallback.clone()
        };
        documents
            .iter()
            .map(|d| ContentLocator::from_document(d))
            .collect()
    }
}
