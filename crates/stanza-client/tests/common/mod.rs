//! Common test utilities and harness for stanza-client integration tests.

use serde_json::json;
use stanza_client::StanzaConfig;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Path prefix of the mock listing API.
pub const LISTING_PATH: &str = "/contents";

/// Test harness wrapping a mock server.
///
/// The server's origin is a loopback address, so the pipeline treats it as a
/// local deployment and requests paths without a base prefix.
pub struct TestHarness {
    /// The mock server.
    pub server: MockServer,
}

impl TestHarness {
    /// Start a fresh mock server.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// A config pointing the site and listing API at the mock server.
    pub fn config(&self) -> StanzaConfig {
        let mut config = StanzaConfig::default();
        config.site.origin = self.server.uri();
        config.site.origin_env = None;
        config.discovery.listing_url = Some(format!("{}{LISTING_PATH}", self.server.uri()));
        config.assets.probe_timeout_ms = 500;
        config.http.request_timeout_ms = 2_000;
        config
    }

    /// A config with no listing API, so discovery always falls back.
    pub fn config_without_listing(&self) -> StanzaConfig {
        let mut config = self.config();
        config.discovery.listing_url = None;
        config
    }

    /// Serve a document body at `doc_path`.
    pub async fn document(&self, doc_path: &str, body: &str) {
        Mock::given(method("GET"))
            .and(path(format!("/{doc_path}")))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `status` for GET `doc_path`.
    pub async fn document_status(&self, doc_path: &str, status: u16) {
        Mock::given(method("GET"))
            .and(path(format!("/{doc_path}")))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    /// Make HEAD `asset_path` succeed.
    pub async fn asset(&self, asset_path: &str) {
        Mock::given(method("HEAD"))
            .and(path(format!("/{asset_path}")))
            .respond_with(ResponseTemplate::new(200))
            .mount(&self.server)
            .await;
    }

    /// Serve a single-page listing of `root`.
    pub async fn listing(&self, root: &str, entries: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("{LISTING_PATH}/{root}")))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries))
            .mount(&self.server)
            .await;
    }

    /// Serve page `page` of the listing of `root`.
    pub async fn listing_page(&self, root: &str, page: u32, entries: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("{LISTING_PATH}/{root}")))
            .and(query_param("page", page.to_string()))
            .respond_with(ResponseTemplate::new(200).set_body_json(entries))
            .mount(&self.server)
            .await;
    }

    /// Answer the listing of `root` with a raw response.
    pub async fn listing_response(&self, root: &str, response: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path(format!("{LISTING_PATH}/{root}")))
            .respond_with(response)
            .mount(&self.server)
            .await;
    }
}

/// Listing entries for directories.
pub fn dirs(names: &[&str]) -> serde_json::Value {
    json!(
        names
            .iter()
            .map(|n| json!({"name": n, "type": "dir"}))
            .collect::<Vec<_>>()
    )
}

/// A document with a full frontmatter block.
pub fn poem(title: &str, body: &str) -> String {
    format!(
        "---\ntitle: \"{title}\"\nauthor: Test Poet\nlanguage: en\nform: haiku\nlength: short\n---\n\n{body}\n"
    )
}
