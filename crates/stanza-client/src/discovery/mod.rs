//! Content discovery.
//!
//! Discovery produces the ordered list of [`ContentLocator`]s a pipeline pass
//! works through. It tries the remote listing API first and falls back to a
//! static list whenever that is not possible. It never fails: the worst case
//! is an empty list.
//!
//! # Strategies
//!
//! Two layout generations exist behind the [`DiscoveryStrategy`] trait:
//!
//! - [`NumberedStrategy`]: `Poetry/<n>/poem.md`, sorted by number
//! - [`LegacyStrategy`]: category directories of `.md` files, in root then
//!   name order
//!
//! # Fallback
//!
//! The fallback list is used when no listing URL is configured, or when
//! listing ANY root fails (transport error, non-2xx status, or a body that is
//! not a JSON array of `{name, type}` objects). A partial remote result is
//! never returned.

pub mod fallback;
pub mod legacy;
pub mod listing;
pub mod numbered;

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use stanza_core::ContentLocator;

use crate::Result;
use crate::config::{DiscoveryConfig, Layout};

pub use legacy::LegacyStrategy;
pub use listing::{DirectoryListing, EntryKind, HttpListing, ListingEntry};
pub use numbered::NumberedStrategy;

/// Layout-specific discovery rules.
pub trait DiscoveryStrategy: Send + Sync {
    /// The layout this strategy discovers.
    fn layout(&self) -> Layout;

    /// Roots to list, in order.
    fn roots(&self) -> &[String];

    /// Locators for the matching entries of one root's listing.
    fn select(&self, root: &str, entries: &[ListingEntry]) -> Vec<ContentLocator>;

    /// Final ordering of the remote result, across all roots.
    fn finish(&self, locators: Vec<ContentLocator>) -> Vec<ContentLocator> {
        locators
    }

    /// The fallback list, in its declared order.
    fn fallback(&self) -> Vec<ContentLocator>;
}

/// Create the strategy for the configured layout.
pub fn strategy_for(config: &DiscoveryConfig) -> Box<dyn DiscoveryStrategy> {
    match config.layout {
        Layout::Numbered => Box::new(NumberedStrategy::from_config(config)),
        Layout::Legacy => Box::new(LegacyStrategy::from_config(config)),
    }
}

/// Where a discovery result came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DiscoverySource {
    /// The remote listing API.
    Remote,
    /// The static fallback list.
    Fallback,
}

impl fmt::Display for DiscoverySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DiscoverySource::Remote => write!(f, "remote"),
            DiscoverySource::Fallback => write!(f, "fallback"),
        }
    }
}

/// A discovery result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Discovery {
    /// Locators in pass order, without duplicates.
    pub locators: Vec<ContentLocator>,
    /// Source that produced them.
    pub source: DiscoverySource,
}

/// Produces content locators for one pipeline pass.
pub struct DiscoveryService {
    strategy: Box<dyn DiscoveryStrategy>,
    listing: Option<Arc<dyn DirectoryListing>>,
}

impl fmt::Debug for DiscoveryService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiscoveryService")
            .field("layout", &self.strategy.layout())
            .field("roots", &self.strategy.roots())
            .field("remote", &self.listing.is_some())
            .finish()
    }
}

impl DiscoveryService {
    /// Create a service. Without a listing, every pass uses the fallback.
    pub fn new(
        strategy: Box<dyn DiscoveryStrategy>,
        listing: Option<Arc<dyn DirectoryListing>>,
    ) -> Self {
        Self { strategy, listing }
    }

    /// Build from the `[discovery]` config section, sharing `client` for
    /// listing requests.
    pub fn from_config(config: &DiscoveryConfig, client: reqwest::Client) -> Result<Self> {
        let listing: Option<Arc<dyn DirectoryListing>> = match &config.listing_url {
            Some(url) => Some(Arc::new(HttpListing::new(
                client,
                url,
                config.per_page,
                config.max_pages,
            )?)),
            None => None,
        };
        Ok(Self::new(strategy_for(config), listing))
    }

    /// The strategy in use.
    pub fn strategy(&self) -> &dyn DiscoveryStrategy {
        self.strategy.as_ref()
    }

    /// Discover locators. Never fails.
    pub async fn discover(&self) -> Vec<ContentLocator> {
        self.discover_with_source().await.locators
    }

    /// Discover locators and report which source produced them.
    pub async fn discover_with_source(&self) -> Discovery {
        let Some(listing) = &self.listing else {
            tracing::info!("No listing API configured, using fallback list");
            return self.fallback_discovery();
        };

        match self.discover_remote(listing.as_ref()).await {
            Ok(locators) => {
                let locators = dedupe(locators);
                tracing::info!(
                    layout = ?self.strategy.layout(),
                    count = locators.len(),
                    "Discovered content from listing API"
                );
                Discovery {
                    locators,
                    source: DiscoverySource::Remote,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "Remote discovery failed, using fallback list");
                self.fallback_discovery()
            }
        }
    }

    async fn discover_remote(&self, listing: &dyn DirectoryListing) -> Result<Vec<ContentLocator>> {
        let mut locators = Vec::new();
        for root in self.strategy.roots() {
            let entries = listing.list(root).await?;
            let selected = self.strategy.select(root, &entries);
            tracing::debug!(
                root = %root,
                entries = entries.len(),
                selected = selected.len(),
                "Listed root"
            );
            locators.extend(selected);
        }
        Ok(self.strategy.finish(locators))
    }

    fn fallback_discovery(&self) -> Discovery {
        let locators = dedupe(self.strategy.fallback());
        tracing::info!(count = locators.len(), "Using fallback content list");
        Discovery {
            locators,
            source: DiscoverySource::Fallback,
        }
    }
}

/// Remove repeated containers, keeping the first occurrence. A later
/// locator whose identity is already taken is dropped as well, so identities
/// stay unique within one pass.
pub fn dedupe(locators: Vec<ContentLocator>) -> Vec<ContentLocator> {
    let mut containers = HashSet::new();
    let mut identities = HashSet::new();
    locators
        .into_iter()
        .filter(|l| containers.insert(l.container().to_string()))
        .filter(|l| {
            let unique = identities.insert(l.identity().to_string());
            if !unique {
                tracing::warn!(
                    container = %l.container(),
                    identity = %l.identity(),
                    "Dropping locator with a duplicate identity"
                );
            }
            unique
        })
        .collect()
}
