//! Companion image resolution.
//!
//! Each container may hold one image named `image.<ext>`. The resolver
//! probes the configured extensions and returns the site path of the most
//! preferred one that exists, or an empty string. A missing image is a
//! normal outcome, and so is a host that could not be asked: both yield an
//! empty path, and only the debug log tells them apart.

use std::sync::Arc;
use std::time::Duration;

use futures::future::join_all;
use stanza_core::util::paths::join_site_path;

use crate::config::AssetConfig;
use crate::store::ContentStore;

/// Outcome of one probe.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Probe {
    Found,
    Missing,
    Unreachable,
    TimedOut,
}

impl Probe {
    fn exists(self) -> bool {
        self == Probe::Found
    }
}

/// Resolves companion images through a [`ContentStore`].
pub struct AssetResolver {
    store: Arc<dyn ContentStore>,
    candidates: Vec<String>,
    file_stem: String,
    probe_timeout: Duration,
    parallel: bool,
    legacy_image_dir: String,
}

impl std::fmt::Debug for AssetResolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssetResolver")
            .field("candidates", &self.candidates)
            .field("file_stem", &self.file_stem)
            .field("probe_timeout", &self.probe_timeout)
            .field("parallel", &self.parallel)
            .finish()
    }
}

impl AssetResolver {
    /// Create a resolver from the `[assets]` config section.
    pub fn new(store: Arc<dyn ContentStore>, config: &AssetConfig) -> Self {
        Self {
            store,
            candidates: config
                .candidates
                .iter()
                .map(|c| c.trim().trim_start_matches('.').to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            file_stem: config.file_stem.clone(),
            probe_timeout: config.probe_timeout(),
            parallel: config.parallel_probes,
            legacy_image_dir: config.legacy_image_dir.clone(),
        }
    }

    /// Candidate image paths for a container, most preferred first.
    pub fn candidate_paths(&self, container: &str) -> Vec<String> {
        self.candidates
            .iter()
            .map(|ext| join_site_path("", &[container, &format!("{}.{ext}", self.file_stem)]))
            .collect()
    }

    /// Site path of the best image in `container`, or `""` when there is
    /// none.
    pub async fn resolve_asset(&self, container: &str) -> String {
        let candidates = self.candidate_paths(container);
        if candidates.is_empty() {
            return String::new();
        }

        let found = if self.parallel {
            self.first_existing_parallel(&candidates).await
        } else {
            self.first_existing_sequential(&candidates).await
        };

        match found {
            Some(path) => self.store.site_path(path),
            None => {
                tracing::debug!(container, "No companion image found");
                String::new()
            }
        }
    }

    /// Site path of an image a document declares by file name, looked up in
    /// `dir` (or the configured legacy image directory when `dir` is `None`).
    pub async fn resolve_declared(&self, dir: Option<&str>, file: &str) -> String {
        let file = file.trim();
        if file.is_empty() {
            return String::new();
        }
        let dir = dir.unwrap_or(&self.legacy_image_dir);
        let path = join_site_path("", &[dir, file]);

        if self.probe(&path).await.exists() {
            self.store.site_path(&path)
        } else {
            tracing::debug!(path = %path, "Declared image not found");
            String::new()
        }
    }

    async fn first_existing_sequential<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        for candidate in candidates {
            if self.probe(candidate).await.exists() {
                return Some(candidate);
            }
        }
        None
    }

    async fn first_existing_parallel<'a>(&self, candidates: &'a [String]) -> Option<&'a str> {
        let results = join_all(candidates.iter().map(|c| self.probe(c))).await;
        candidates
            .iter()
            .zip(results)
            .find(|(_, probe)| probe.exists())
            .map(|(candidate, _)| candidate.as_str())
    }

    async fn probe(&self, path: &str) -> Probe {
        let outcome = match tokio::time::timeout(self.probe_timeout, self.store.probe(path)).await {
            Ok(Ok(true)) => Probe::Found,
            Ok(Ok(false)) => Probe::Missing,
            Ok(Err(e)) => {
                tracing::debug!(path, error = %e, "Asset probe failed");
                Probe::Unreachable
            }
            Err(_) => Probe::TimedOut,
        };
        tracing::trace!(path, outcome = ?outcome, "Asset probe");
        outcome
    }
}
