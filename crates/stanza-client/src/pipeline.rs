//! Pipeline orchestration.
//!
//! One pass runs discovery once, then for each locator: fetch the document,
//! parse it, resolve its image, and normalize the result into a
//! [`ContentRecord`]. Items run concurrently up to `pipeline.concurrency`,
//! and results come back in discovery order. An item whose document cannot
//! be fetched is logged and skipped; nothing else can fail a pass.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use serde::Serialize;
use stanza_content::{ContentRecord, PoemMetadata, normalize, parse};
use stanza_core::ContentLocator;

use crate::Result;
use crate::assets::AssetResolver;
use crate::config::{AssetConfig, Layout, StanzaConfig};
use crate::discovery::{DiscoveryService, DiscoverySource};
use crate::environment::EnvironmentResolver;
use crate::store::{ContentStore, HttpStore, build_http_client};

/// Counts for one pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    /// Where the locators came from.
    pub source: DiscoverySource,
    /// Locators discovered.
    pub discovered: usize,
    /// Locators processed after applying the limit.
    pub attempted: usize,
    /// Records produced.
    pub loaded: usize,
    /// Items skipped because their document could not be fetched.
    pub skipped: usize,
}

/// Records and counts for one pass.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Records in discovery order.
    pub records: Vec<ContentRecord>,
    /// Pass counts.
    pub summary: RunSummary,
}

/// The content resolution pipeline.
pub struct Pipeline {
    discovery: DiscoveryService,
    store: Arc<dyn ContentStore>,
    assets: AssetResolver,
    concurrency: usize,
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("discovery", &self.discovery)
            .field("assets", &self.assets)
            .field("concurrency", &self.concurrency)
            .finish_non_exhaustive()
    }
}

impl Pipeline {
    /// Assemble a pipeline from its parts.
    pub fn new(
        discovery: DiscoveryService,
        store: Arc<dyn ContentStore>,
        assets: &AssetConfig,
        concurrency: usize,
    ) -> Self {
        Self {
            discovery,
            assets: AssetResolver::new(store.clone(), assets),
            store,
            concurrency: concurrency.max(1),
        }
    }

    /// Build the HTTP-backed pipeline described by `config`.
    pub fn from_config(config: &StanzaConfig) -> Result<Self> {
        let client = build_http_client(&config.http)?;
        let environment = EnvironmentResolver::from_config(&config.site)?;
        tracing::debug!(
            origin = %environment.origin(),
            base_path = %environment.resolve_base_path(),
            "Resolved environment"
        );

        let store: Arc<dyn ContentStore> = Arc::new(HttpStore::new(client.clone(), environment));
        let discovery = DiscoveryService::from_config(&config.discovery, client)?;
        Ok(Self::new(
            discovery,
            store,
            &config.assets,
            config.pipeline.concurrency,
        ))
    }

    /// The discovery service.
    pub fn discovery(&self) -> &DiscoveryService {
        &self.discovery
    }

    /// Run one pass and return its records, in discovery order.
    ///
    /// `limit` caps how many discovered items are processed; `None` processes
    /// all of them.
    pub async fn run(&self, limit: Option<usize>) -> Vec<ContentRecord> {
        self.run_report(limit).await.records
    }

    /// Run one pass and return its records with counts.
    pub async fn run_report(&self, limit: Option<usize>) -> RunReport {
        let discovery = self.discovery.discover_with_source().await;
        let discovered = discovery.locators.len();

        let locators: Vec<ContentLocator> = match limit {
            Some(n) => discovery.locators.into_iter().take(n).collect(),
            None => discovery.locators,
        };
        let attempted = locators.len();

        let records: Vec<ContentRecord> = stream::iter(locators.iter())
            .map(|locator| self.load_or_skip(locator))
            .buffered(self.concurrency)
            .collect::<Vec<_>>()
            .await
            .into_iter()
            .flatten()
            .collect();

        let summary = RunSummary {
            source: discovery.source,
            discovered,
            attempted,
            loaded: records.len(),
            skipped: attempted - records.len(),
        };
        tracing::info!(
            source = %summary.source,
            discovered,
            loaded = summary.loaded,
            skipped = summary.skipped,
            "Pipeline pass complete"
        );

        RunReport { records, summary }
    }

    async fn load_or_skip(&self, locator: &ContentLocator) -> Option<ContentRecord> {
        match self.load(locator).await {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(locator = %locator, error = %e, "Skipping item");
                None
            }
        }
    }

    /// Fetch, parse, resolve, and normalize one item.
    pub async fn load(&self, locator: &ContentLocator) -> Result<ContentRecord> {
        let raw = self.store.fetch_text(locator.document()).await?;
        let document = parse(&raw);
        let metadata = PoemMetadata::from_frontmatter(&document.metadata);

        let asset_path = self.resolve_asset_for(locator, &metadata).await;
        Ok(normalize(locator, &metadata, &document.body, &asset_path))
    }

    /// Legacy documents may name their image in frontmatter; that image wins
    /// when it exists. Every other case probes the container.
    async fn resolve_asset_for(&self, locator: &ContentLocator, metadata: &PoemMetadata) -> String {
        let declared = match (self.discovery.strategy().layout(), metadata.image.as_deref()) {
            (Layout::Legacy, Some(image)) => self.assets.resolve_declared(None, image).await,
            _ => String::new(),
        };
        if !declared.is_empty() {
            return declared;
        }
        self.assets.resolve_asset(locator.container()).await
    }
}
