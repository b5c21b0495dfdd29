//! Content locators.
//!
//! A [`ContentLocator`] names one container in the static file store: the
//! logical directory that groups one poem's document and its image. It is
//! produced by discovery and drives every fetch the pipeline makes.

use std::fmt;
use std::hash::{Hash, Hasher};

use serde::Serialize;

use crate::util::ids::{container_identity, is_numeric_name};
use crate::util::paths::{join_site_path, strip_extension};

/// Identifies where one content item lives.
///
/// Two locators are equal iff their container paths are equal; the document
/// path and identity are derived data and take no part in comparison.
#[derive(Debug, Clone, Serialize)]
pub struct ContentLocator {
    container: String,
    document: String,
    identity: String,
}

impl ContentLocator {
    /// Create a locator from a container path and the document path inside
    /// the store. The identity is the canonical container path.
    pub fn new(container: impl Into<String>, document: impl Into<String>) -> Self {
        let container = container_identity(&container.into());
        Self {
            document: document.into().trim_matches('/').to_string(),
            identity: container.clone(),
            container,
        }
    }

    /// A numbered container `<root>/<name>` holding `<document_file>`,
    /// identified by `name` alone.
    ///
    /// Bare names are only unique under a single root; see
    /// [`ContentLocator::new`] for root-qualified identities.
    ///
    /// ```
    /// use stanza_core::ContentLocator;
    ///
    /// let loc = ContentLocator::numbered("Poetry", "7", "poem.md");
    /// assert_eq!(loc.container(), "Poetry/7");
    /// assert_eq!(loc.document(), "Poetry/7/poem.md");
    /// assert_eq!(loc.identity(), "7");
    /// ```
    pub fn numbered(root: &str, name: &str, document_file: &str) -> Self {
        let container = join_site_path("", &[root, name]);
        let document = join_site_path("", &[&container, document_file]);
        Self {
            identity: name.trim_matches('/').to_string(),
            ..Self::new(container, document)
        }
    }

    /// A legacy item: one document file whose container is its own path
    /// without the extension.
    ///
    /// ```
    /// use stanza_core::ContentLocator;
    ///
    /// let loc = ContentLocator::from_document("Poetry/forms/sonnet/rain.md");
    /// assert_eq!(loc.container(), "Poetry/forms/sonnet/rain");
    /// assert_eq!(loc.document(), "Poetry/forms/sonnet/rain.md");
    /// ```
    pub fn from_document(document: &str) -> Self {
        let document = document.trim_matches('/');
        Self::new(strip_extension(document), document)
    }

    /// Container path, without leading or trailing slashes.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Path of the document file inside the store.
    pub fn document(&self) -> &str {
        &self.document
    }

    /// Identity derived from the container path.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// The container's last segment, when it is purely numeric.
    ///
    /// Compare these with [`compare_numeric`](crate::util::ids::compare_numeric);
    /// they may exceed any integer type.
    pub fn numeric_name(&self) -> Option<&str> {
        self.container
            .rsplit('/')
            .next()
            .filter(|last| is_numeric_name(last))
    }
}

impl PartialEq for ContentLocator {
    fn eq(&self, other: &Self) -> bool {
        self.container == other.container
    }
}

impl Eq for ContentLocator {}

impl Hash for ContentLocator {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.container.hash(state);
    }
}

impl fmt::Display for ContentLocator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.container)
    }
}
