//! Environment resolution: which base path prefixes every request.
//!
//! The same site is served two ways: from a local development server at the
//! site root, and from a hosted deployment under a path prefix (a project
//! page such as `https://example.github.io/poetry-site/`). The
//! [`EnvironmentResolver`] is the single place that decides between them, and
//! every document, listing, and asset URL is built through it.

use std::net::IpAddr;
use std::sync::Arc;

use reqwest::Url;
use stanza_core::ContentLocator;
use stanza_core::util::paths::{join_site_path, normalize_prefix};

use crate::config::SiteConfig;
use crate::Result;

/// Supplies a raw origin string on demand; `None` means "not set".
pub type OriginProvider = Arc<dyn Fn() -> Option<String> + Send + Sync>;

/// Where the current origin comes from.
#[derive(Clone)]
pub enum OriginSource {
    /// A fixed origin.
    Fixed(Url),
    /// An environment variable read on every call, with a fixed fallback
    /// when it is unset or not a URL.
    Env {
        /// Variable name.
        var: String,
        /// Origin used when the variable is unusable.
        fallback: Url,
    },
    /// A caller-supplied provider invoked on every call, with the same
    /// fallback rules as [`OriginSource::Env`].
    Provider {
        /// Origin lookup.
        provider: OriginProvider,
        /// Origin used when the provider yields nothing usable.
        fallback: Url,
    },
}

impl OriginSource {
    /// The current origin.
    pub fn current(&self) -> Url {
        match self {
            OriginSource::Fixed(url) => url.clone(),
            OriginSource::Env { var, fallback } => {
                parse_origin(std::env::var(var).ok(), fallback, var)
            }
            OriginSource::Provider { provider, fallback } => {
                parse_origin(provider(), fallback, "provider")
            }
        }
    }
}

impl std::fmt::Debug for OriginSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OriginSource::Fixed(url) => f.debug_tuple("Fixed").field(&url.as_str()).finish(),
            OriginSource::Env { var, fallback } => f
                .debug_struct("Env")
                .field("var", var)
                .field("fallback", &fallback.as_str())
                .finish(),
            OriginSource::Provider { fallback, .. } => f
                .debug_struct("Provider")
                .field("fallback", &fallback.as_str())
                .finish_non_exhaustive(),
        }
    }
}

fn parse_origin(value: Option<String>, fallback: &Url, source: &str) -> Url {
    match value {
        Some(value) => Url::parse(value.trim()).unwrap_or_else(|e| {
            tracing::warn!(source, error = %e, "Ignoring invalid origin");
            fallback.clone()
        }),
        None => fallback.clone(),
    }
}

/// Decides the base path for the current execution context.
#[derive(Debug, Clone)]
pub struct EnvironmentResolver {
    origin: OriginSource,
    deployment_prefix: String,
}

impl EnvironmentResolver {
    /// Create a resolver; the prefix is normalized to `/segment` form.
    pub fn new(origin: OriginSource, deployment_prefix: &str) -> Self {
        Self {
            origin,
            deployment_prefix: normalize_prefix(deployment_prefix),
        }
    }

    /// Create a resolver with a fixed origin.
    pub fn fixed(origin: Url, deployment_prefix: &str) -> Self {
        Self::new(OriginSource::Fixed(origin), deployment_prefix)
    }

    /// Build from the `[site]` config section.
    pub fn from_config(site: &SiteConfig) -> Result<Self> {
        let fallback = Url::parse(&site.origin).map_err(|e| {
            stanza_core::Error::invalid_url(site.origin.as_str(), e.to_string())
        })?;
        let origin = match &site.origin_env {
            Some(var) if !var.trim().is_empty() => OriginSource::Env {
                var: var.clone(),
                fallback,
            },
            _ => OriginSource::Fixed(fallback),
        };
        Ok(Self::new(origin, &site.deployment_prefix))
    }

    /// The current origin, read fresh.
    pub fn origin(&self) -> Url {
        self.origin.current()
    }

    /// Whether the current origin is a local development host.
    pub fn is_local(&self) -> bool {
        let origin = self.origin();
        match origin.host_str() {
            Some(host) => is_local_host(host),
            // file:// and other hostless origins only exist on a developer's
            // machine
            None => true,
        }
    }

    /// The base path for the current context: empty when local, the
    /// deployment prefix otherwise.
    ///
    /// Not cached; the origin is inspected on every call.
    pub fn resolve_base_path(&self) -> String {
        if self.is_local() {
            String::new()
        } else {
            self.deployment_prefix.clone()
        }
    }

    /// Site path of a store-relative path, as a page would reference it.
    ///
    /// ```
    /// use reqwest::Url;
    /// use stanza_client::EnvironmentResolver;
    ///
    /// let local = EnvironmentResolver::fixed(Url::parse("http://localhost:8000").unwrap(), "/poetry-site");
    /// assert_eq!(local.site_path("Poetry/7/image.png"), "Poetry/7/image.png");
    ///
    /// let hosted = EnvironmentResolver::fixed(Url::parse("https://example.github.io").unwrap(), "/poetry-site");
    /// assert_eq!(hosted.site_path("Poetry/7/image.png"), "/poetry-site/Poetry/7/image.png");
    /// ```
    pub fn site_path(&self, relative: &str) -> String {
        join_site_path(&self.resolve_base_path(), &[relative])
    }

    /// Absolute URL of a store-relative path.
    pub fn url_for(&self, relative: &str) -> Result<Url> {
        let mut url = self.origin();
        let path = format!("/{}", self.site_path(relative).trim_start_matches('/'));
        url.set_path(&path);
        url.set_query(None);
        url.set_fragment(None);
        if url.cannot_be_a_base() {
            return Err(stanza_core::Error::invalid_url(url.as_str(), "origin cannot hold a path").into());
        }
        Ok(url)
    }

    /// URL of a locator's document.
    pub fn document_url(&self, locator: &ContentLocator) -> Result<Url> {
        self.url_for(locator.document())
    }

    /// URL of an asset given by its store-relative path.
    pub fn asset_url(&self, relative: &str) -> Result<Url> {
        self.url_for(relative)
    }
}

/// Whether a host names the local machine.
pub fn is_local_host(host: &str) -> bool {
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let lower = host.to_ascii_lowercase();
    if lower == "localhost" || lower.ends_with(".localhost") {
        return true;
    }
    match host.parse::<IpAddr>() {
        Ok(ip) => ip.is_loopback() || ip.is_unspecified(),
        Err(_) => false,
    }
}
