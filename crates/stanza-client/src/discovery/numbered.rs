//! Numbered layout: `Poetry/<n>/poem.md`.

use stanza_core::ContentLocator;
use stanza_core::util::ids::{compare_numeric, container_identity, is_numeric_name};
use stanza_core::util::paths::join_site_path;

use super::DiscoveryStrategy;
use super::fallback;
use super::listing::{EntryKind, ListingEntry};
use crate::config::{DiscoveryConfig, Layout};

/// Discovers numbered containers, each holding one document file.
///
/// With a single root, a container `<root>/<n>` is identified by `n`. With
/// several roots, or for a fallback container outside the root, the identity
/// is the container path, since the same number may appear under each root.
#[derive(Debug, Clone)]
pub struct NumberedStrategy {
    roots: Vec<String>,
    document_file: String,
    fallback: Vec<String>,
}

impl NumberedStrategy {
    /// Create a strategy. An empty `fallback` selects the built-in list.
    pub fn new(roots: Vec<String>, document_file: &str, fallback: Vec<String>) -> Self {
        Self {
            roots,
            document_file: document_file.to_string(),
            fallback,
        }
    }

    /// Build from the `[discovery]` config section.
    pub fn from_config(config: &DiscoveryConfig) -> Self {
        Self::new(
            config.effective_roots(),
            &config.document_file,
            config.fallback.clone(),
        )
    }

    fn locator_for(&self, container: &str) -> ContentLocator {
        let container = container_identity(container);
        let bare = match self.roots.as_slice() {
            [root] => container.rsplit_once('/').filter(|(parent, name)| {
                *parent == container_identity(root) && is_numeric_name(name)
            }),
            _ => None,
        };
        if let Some((parent, name)) = bare {
            return ContentLocator::numbered(parent, name, &self.document_file);
        }
        let document = join_site_path("", &[&container, &self.document_file]);
        ContentLocator::new(container, document)
    }
}

impl DiscoveryStrategy for NumberedStrategy {
    fn layout(&self) -> Layout {
        Layout::Numbered
    }

    fn roots(&self) -> &[String] {
        &self.roots
    }

    fn select(&self, root: &str, entries: &[ListingEntry]) -> Vec<ContentLocator> {
        entries
            .iter()
            .filter(|e| e.kind == EntryKind::Dir && is_numeric_name(&e.name))
            .map(|e| self.locator_for(&join_site_path("", &[root, &e.name])))
            .collect()
    }

    fn finish(&self, mut locators: Vec<ContentLocator>) -> Vec<ContentLocator> {
        locators.sort_by(|a, b| {
            let by_number = match (a.numeric_name(), b.numeric_name()) {
                (Some(x), Some(y)) => compare_numeric(x, y),
                (x, y) => x.is_none().cmp(&y.is_none()),
            };
            by_number.then_with(|| a.container().cmp(b.container()))
        });
        locators
    }

    fn fallback(&self) -> Vec<ContentLocator> {
        let containers = if self.fallback.is_empty() {
            fallback::numbered_containers()
        } else {
            self.fallback.clone()
        };
        containers.iter().map(|c| self.locator_for(c)).collect()
    }
}
