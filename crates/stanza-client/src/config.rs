//! Pipeline configuration.
//!
//! Every field has a default, so an empty or missing config file yields a
//! working setup for a site served locally on port 8000 with discovery
//! running from the built-in fallback list.
//!
//! ```toml
//! [site]
//! origin = "https://example.github.io"
//! deployment_prefix = "/poetry-site"
//!
//! [discovery]
//! layout = "numbered"
//! roots = ["Poetry"]
//! listing_url = "https://api.github.com/repos/example/poetry-site/contents"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use stanza_core::ConfigPathResolver;

use crate::{Error, Result};

/// Project name used for config path and environment variable resolution.
pub const PROJECT_NAME: &str = "stanza";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StanzaConfig {
    /// Where the static site lives.
    pub site: SiteConfig,
    /// How content items are found.
    pub discovery: DiscoveryConfig,
    /// How companion images are found.
    pub assets: AssetConfig,
    /// HTTP client settings.
    pub http: HttpConfig,
    /// Orchestrator settings.
    pub pipeline: PipelineConfig,
}

/// Static site location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Origin of the static file store, e.g. `http://localhost:8000`.
    pub origin: String,
    /// Environment variable consulted for the origin on every request.
    pub origin_env: Option<String>,
    /// Path prefix applied when the origin is not a local host.
    pub deployment_prefix: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            origin: "http://localhost:8000".to_string(),
            origin_env: Some("STANZA_ORIGIN".to_string()),
            deployment_prefix: "/poetry-site".to_string(),
        }
    }
}

/// Content layout generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    /// `Poetry/<n>/poem.md` containers.
    #[default]
    Numbered,
    /// Category directories holding one document file per poem.
    Legacy,
}

/// Discovery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Layout generation to discover.
    pub layout: Layout,
    /// Top-level content roots to list; empty means the layout's default
    /// roots.
    pub roots: Vec<String>,
    /// Base URL of the directory-listing API; `None` skips remote discovery.
    pub listing_url: Option<String>,
    /// Page size requested from the listing API.
    pub per_page: u32,
    /// Upper bound on pages fetched per root.
    pub max_pages: u32,
    /// Document file inside a numbered container.
    pub document_file: String,
    /// File extensions recognized as documents in the legacy layout.
    pub content_extensions: Vec<String>,
    /// Fallback locators; empty means the built-in list for the layout.
    pub fallback: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Numbered,
            roots: Vec::new(),
            listing_url: None,
            per_page: 100,
            max_pages: 10,
            document_file: "poem.md".to_string(),
            content_extensions: vec!["md".to_string()],
            fallback: Vec::new(),
        }
    }
}

impl DiscoveryConfig {
    /// Roots to list, falling back to the layout's defaults.
    pub fn effective_roots(&self) -> Vec<String> {
        if !self.roots.is_empty() {
            return self.roots.clone();
        }
        let defaults: &[&str] = match self.layout {
            Layout::Numbered => &["Poetry"],
            Layout::Legacy => &[
                "Poetry/by_language/english/lengths/short",
                "Poetry/by_language/english/forms/free_verse",
                "Poetry/by_language/english/forms/sonnet",
                "Poetry/by_language/hindi/lengths/standard",
            ],
        };
        defaults.iter().map(|r| r.to_string()).collect()
    }
}

/// Asset probing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    /// Candidate extensions, most preferred first.
    pub candidates: Vec<String>,
    /// File stem of the companion image inside a container.
    pub file_stem: String,
    /// Deadline for a single existence probe.
    pub probe_timeout_ms: u64,
    /// Probe all candidates at once instead of one after another.
    pub parallel_probes: bool,
    /// Directory holding images declared by legacy documents.
    pub legacy_image_dir: String,
}

impl Default for AssetConfig {
    fn default() -> Self {
        Self {
            candidates: ["png", "jpg", "jpeg", "webp", "gif"]
                .into_iter()
                .map(String::from)
                .collect(),
            file_stem: "image".to_string(),
            probe_timeout_ms: 3_000,
            parallel_probes: true,
            legacy_image_dir: "assets/images/poems".to_string(),
        }
    }
}

impl AssetConfig {
    /// Probe deadline as a `Duration`.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }
}

/// HTTP client settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Deadline for document and listing requests.
    pub request_timeout_ms: u64,
    /// User-Agent header; listing APIs such as GitHub's reject requests
    /// without one.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            request_timeout_ms: 10_000,
            user_agent: format!("stanza/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Request deadline as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

/// Orchestrator settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Maximum number of items processed at once.
    pub concurrency: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self { concurrency: 8 }
    }
}

impl StanzaConfig {
    /// The config path resolver for this project.
    pub fn resolver() -> ConfigPathResolver {
        ConfigPathResolver::new(PROJECT_NAME)
    }

    /// Load configuration.
    ///
    /// The path comes from `explicit`, then `STANZA_CONFIG`, then the
    /// platform config directory. A missing file yields the defaults; an
    /// unreadable or invalid file is an error.
    pub fn load(explicit: Option<&str>) -> Result<Self> {
        match Self::resolver().resolve(explicit) {
            Some(path) if path.exists() => Self::from_file(&path),
            Some(path) => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                Ok(Self::default())
            }
            None => Ok(Self::default()),
        }
    }

    /// Read and validate a config file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| stanza_core::Error::io_with_path(e, path))?;
        let config = Self::from_toml_str(&content)?;
        tracing::debug!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    /// Parse and validate configuration from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to pretty TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Reject settings the pipeline cannot run with.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::Core(stanza_core::Error::config(message)));

        if reqwest::Url::parse(&self.site.origin).is_err() {
            return invalid(format!("site.origin '{}' is not a URL", self.site.origin));
        }
        if let Some(listing) = &self.discovery.listing_url {
            if reqwest::Url::parse(listing).is_err() {
                return invalid(format!("discovery.listing_url '{listing}' is not a URL"));
            }
        }
        if self.discovery.per_page == 0 {
            return invalid("discovery.per_page must be at least 1".to_string());
        }
        if self.discovery.max_pages == 0 {
            return invalid("discovery.max_pages must be at least 1".to_string());
        }
        if self.pipeline.concurrency == 0 {
            return invalid("pipeline.concurrency must be at least 1".to_string());
        }
        if self.assets.file_stem.trim().is_empty() {
            return invalid("assets.file_stem must not be empty".to_string());
        }
        Ok(())
    }
}
