//! Integration tests for companion image probing over HTTP.

use std::sync::Arc;
use std::time::Duration;

use stanza_client::config::AssetConfig;
use stanza_client::store::build_http_client;
use stanza_client::{AssetResolver, EnvironmentResolver, HttpStore, StanzaConfig};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common::TestHarness;

fn resolver(config: &StanzaConfig, assets: &AssetConfig) -> AssetResolver {
    let client = build_http_client(&config.http).unwrap();
    let environment = EnvironmentResolver::from_config(&config.site).unwrap();
    AssetResolver::new(Arc::new(HttpStore::new(client, environment)), assets)
}

#[tokio::test]
async fn test_png_found() {
    let harness = TestHarness::start().await;
    harness.asset("Poetry/7/image.png").await;
    let config = harness.config();

    let asset = resolver(&config, &config.assets)
        .resolve_asset("Poetry/7")
        .await;

    assert_eq!(asset, "Poetry/7/image.png");
}

#[tokio::test]
async fn test_preference_order_with_parallel_probes() {
    let harness = TestHarness::start().await;
    harness.asset("Poetry/8/image.gif").await;
    harness.asset("Poetry/8/image.jpeg").await;
    harness.asset("Poetry/8/image.webp").await;
    let config = harness.config();

    let asset = resolver(&config, &config.assets)
        .resolve_asset("Poetry/8")
        .await;

    assert_eq!(asset, "Poetry/8/image.jpeg");
}

#[tokio::test]
async fn test_sequential_probes_stop_at_first_hit() {
    let harness = TestHarness::start().await;
    harness.asset("Poetry/9/image.jpg").await;
    let config = harness.config();
    let assets = AssetConfig {
        parallel_probes: false,
        ..config.assets.clone()
    };

    let asset = resolver(&config, &assets).resolve_asset("Poetry/9").await;

    assert_eq!(asset, "Poetry/9/image.jpg");
    let requests = harness.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2, "png then jpg, nothing after the hit");
}

#[tokio::test]
async fn test_no_image_is_empty() {
    let harness = TestHarness::start().await;
    let config = harness.config();

    let asset = resolver(&config, &config.assets)
        .resolve_asset("Poetry/1")
        .await;

    assert_eq!(asset, "");
    let requests = harness.server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 5);
    assert!(requests.iter().all(|r| r.method.as_str() == "HEAD"));
}

#[tokio::test]
async fn test_slow_probe_counts_as_missing() {
    let harness = TestHarness::start().await;
    Mock::given(method("HEAD"))
        .and(path("/Poetry/2/image.png"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&harness.server)
        .await;
    harness.asset("Poetry/2/image.webp").await;

    let config = harness.config();
    let assets = AssetConfig {
        probe_timeout_ms: 100,
        ..config.assets.clone()
    };

    let asset = resolver(&config, &assets).resolve_asset("Poetry/2").await;

    assert_eq!(asset, "Poetry/2/image.webp");
}

#[tokio::test]
async fn test_unreachable_host_is_empty() {
    let harness = TestHarness::start().await;
    let mut config = harness.config();
    config.site.origin = "http://127.0.0.1:9".to_string();

    let asset = resolver(&config, &config.assets)
        .resolve_asset("Poetry/3")
        .await;

    assert_eq!(asset, "");
}

#[tokio::test]
async fn test_declared_legacy_image() {
    let harness = TestHarness::start().await;
    harness.asset("assets/images/poems/15.png").await;
    let config = harness.config();
    let resolver = resolver(&config, &config.assets);

    assert_eq!(
        resolver.resolve_declared(None, "15.png").await,
        "assets/images/poems/15.png"
    );
    assert_eq!(resolver.resolve_declared(None, "16.png").await, "");
}
