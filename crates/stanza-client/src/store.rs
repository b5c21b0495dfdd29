//! Static file store access.
//!
//! The pipeline reads the store through two verbs only: GET a document as
//! text, and HEAD a path to learn whether it exists. [`ContentStore`] is the
//! seam; [`HttpStore`] is the production implementation and
//! [`MemoryStore`](crate::memory::MemoryStore) backs the tests.

use async_trait::async_trait;
use reqwest::{Client, Url};

use crate::Result;
use crate::config::HttpConfig;
use crate::environment::EnvironmentResolver;

/// Read access to the static file store.
///
/// Paths are store-relative (`Poetry/7/poem.md`); implementations decide how
/// they map onto the wire.
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetch a document as UTF-8 text.
    ///
    /// A non-2xx answer is an [`Http`](stanza_core::Error::Http) error; no
    /// answer at all is a [`Transport`](stanza_core::Error::Transport) error.
    async fn fetch_text(&self, path: &str) -> Result<String>;

    /// Ask whether a path exists.
    ///
    /// `Ok(false)` means the store answered and the path is absent. `Err`
    /// means the store could not be asked.
    async fn probe(&self, path: &str) -> Result<bool>;

    /// Site path of a store-relative path, as it should appear in a record.
    fn site_path(&self, path: &str) -> String {
        path.trim_matches('/').to_string()
    }
}

/// Build the shared HTTP client.
pub fn build_http_client(config: &HttpConfig) -> Result<Client> {
    let client = Client::builder()
        .timeout(config.request_timeout())
        .user_agent(config.user_agent.as_str())
        .build()?;
    Ok(client)
}

/// Map a reqwest failure that produced no response to a transport error.
pub(crate) fn transport_error(url: &Url, err: &reqwest::Error) -> crate::Error {
    stanza_core::Error::transport(url.as_str(), err.to_string()).into()
}

/// Content store served over HTTP.
///
/// Every URL is built through the [`EnvironmentResolver`], so the base path
/// is decided afresh on each request.
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    environment: EnvironmentResolver,
}

impl HttpStore {
    /// Create a store from a client and resolver.
    pub fn new(client: Client, environment: EnvironmentResolver) -> Self {
        Self {
            client,
            environment,
        }
    }

    /// The environment resolver in use.
    pub fn environment(&self) -> &EnvironmentResolver {
        &self.environment
    }
}

#[async_trait]
impl ContentStore for HttpStore {
    async fn fetch_text(&self, path: &str) -> Result<String> {
        let url = self.environment.url_for(path)?;
        tracing::debug!(url = %url, "GET document");

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(stanza_core::Error::http(status.as_u16(), url.as_str()).into());
        }
        response.text().await.map_err(|e| transport_error(&url, &e))
    }

    async fn probe(&self, path: &str) -> Result<bool> {
        let url = self.environment.asset_url(path)?;

        let response = self
            .client
            .head(url.clone())
            .send()
            .await
            .map_err(|e| transport_error(&url, &e))?;

        let status = response.status();
        tracing::trace!(url = %url, status = status.as_u16(), "HEAD probe");
        Ok(status.is_success())
    }

    fn site_path(&self, path: &str) -> String {
        self.environment.site_path(path)
    }
}
