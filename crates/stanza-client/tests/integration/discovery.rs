//! Integration tests for remote discovery and fallback.

use serde_json::json;
use stanza_client::config::Layout;
use stanza_client::store::build_http_client;
use stanza_client::{DiscoveryService, DiscoverySource, StanzaConfig};
use wiremock::ResponseTemplate;

use crate::common::{TestHarness, dirs};

fn service(config: &StanzaConfig) -> DiscoveryService {
    let client = build_http_client(&config.http).unwrap();
    DiscoveryService::from_config(&config.discovery, client).unwrap()
}

fn identities(service_result: &stanza_client::Discovery) -> Vec<&str> {
    service_result
        .locators
        .iter()
        .map(|l| l.identity())
        .collect()
}

// ============================================================================
// Remote listing
// ============================================================================

#[tokio::test]
async fn test_numbered_remote_sorted_numerically() {
    let harness = TestHarness::start().await;
    harness
        .listing(
            "Poetry",
            json!([
                {"name": "10", "type": "dir"},
                {"name": "2", "type": "dir"},
                {"name": "1", "type": "dir"},
                {"name": "drafts", "type": "dir"},
                {"name": "README.md", "type": "file"},
                {"name": "3", "type": "file"},
                {"name": "4", "type": "submodule"}
            ]),
        )
        .await;

    let discovery = service(&harness.config()).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Remote);
    assert_eq!(identities(&discovery), vec!["1", "2", "10"]);
    assert_eq!(discovery.locators[2].document(), "Poetry/10/poem.md");
}

#[tokio::test]
async fn test_numbered_names_longer_than_u64_sort_last() {
    let harness = TestHarness::start().await;
    harness
        .listing("Poetry", dirs(&["99999999999999999999999", "1"]))
        .await;

    let discovery = service(&harness.config()).discover_with_source().await;

    assert_eq!(
        identities(&discovery),
        vec!["1", "99999999999999999999999"]
    );
}

#[tokio::test]
async fn test_numbered_roots_sharing_numbers_get_distinct_identities() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["1", "2"])).await;
    harness.listing("Archive", dirs(&["1"])).await;

    let mut config = harness.config();
    config.discovery.roots = vec!["Poetry".to_string(), "Archive".to_string()];

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Remote);
    assert_eq!(
        identities(&discovery),
        vec!["Archive/1", "Poetry/1", "Poetry/2"]
    );
}

#[tokio::test]
async fn test_pagination_concatenates_pages() {
    let harness = TestHarness::start().await;
    harness.listing_page("Poetry", 1, dirs(&["5", "3"])).await;
    harness.listing_page("Poetry", 2, dirs(&["4", "1"])).await;
    harness.listing_page("Poetry", 3, dirs(&["2"])).await;

    let mut config = harness.config();
    config.discovery.per_page = 2;

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Remote);
    assert_eq!(identities(&discovery), vec!["1", "2", "3", "4", "5"]);
}

#[tokio::test]
async fn test_pagination_stops_at_max_pages() {
    let harness = TestHarness::start().await;
    harness.listing_page("Poetry", 1, dirs(&["1", "2"])).await;
    harness.listing_page("Poetry", 2, dirs(&["3", "4"])).await;
    harness.listing_page("Poetry", 3, dirs(&["5", "6"])).await;

    let mut config = harness.config();
    config.discovery.per_page = 2;
    config.discovery.max_pages = 2;

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(identities(&discovery), vec!["1", "2", "3", "4"]);
}

#[tokio::test]
async fn test_server_ignoring_pagination_is_not_duplicated() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["1", "2"])).await;

    let mut config = harness.config();
    config.discovery.per_page = 2;

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Remote);
    assert_eq!(identities(&discovery), vec!["1", "2"]);
}

#[tokio::test]
async fn test_legacy_remote_keeps_root_then_name_order() {
    let harness = TestHarness::start().await;
    harness
        .listing(
            "Poetry/forms/sonnet",
            json!([
                {"name": "winter.md", "type": "file"},
                {"name": "autumn.md", "type": "file"},
                {"name": "cover.png", "type": "file"}
            ]),
        )
        .await;
    harness
        .listing(
            "Poetry/lengths/short",
            json!([{"name": "alpha.md", "type": "file"}]),
        )
        .await;

    let mut config = harness.config();
    config.discovery.layout = Layout::Legacy;
    config.discovery.roots = vec![
        "Poetry/forms/sonnet".to_string(),
        "Poetry/lengths/short".to_string(),
    ];

    let discovery = service(&config).discover_with_source().await;
    let documents: Vec<_> = discovery.locators.iter().map(|l| l.document()).collect();

    assert_eq!(discovery.source, DiscoverySource::Remote);
    assert_eq!(
        documents,
        vec![
            "Poetry/forms/sonnet/autumn.md",
            "Poetry/forms/sonnet/winter.md",
            "Poetry/lengths/short/alpha.md",
        ]
    );
}

// ============================================================================
// Fallback
// ============================================================================

fn with_fallback(mut config: StanzaConfig) -> StanzaConfig {
    config.discovery.fallback = vec![
        "Poetry/3".to_string(),
        "Poetry/1".to_string(),
        "Poetry/2".to_string(),
    ];
    config
}

#[tokio::test]
async fn test_server_error_uses_fallback_in_order() {
    let harness = TestHarness::start().await;
    harness
        .listing_response("Poetry", ResponseTemplate::new(500))
        .await;

    let discovery = service(&with_fallback(harness.config()))
        .discover_with_source()
        .await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
    assert_eq!(identities(&discovery), vec!["3", "1", "2"]);
}

#[tokio::test]
async fn test_malformed_json_uses_fallback() {
    let harness = TestHarness::start().await;
    harness
        .listing_response(
            "Poetry",
            ResponseTemplate::new(200).set_body_string("<html>rate limited</html>"),
        )
        .await;

    let discovery = service(&with_fallback(harness.config()))
        .discover_with_source()
        .await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
    assert_eq!(identities(&discovery), vec!["3", "1", "2"]);
}

#[tokio::test]
async fn test_wrong_json_shape_uses_fallback() {
    let harness = TestHarness::start().await;
    harness
        .listing_response(
            "Poetry",
            ResponseTemplate::new(200).set_body_json(json!({"message": "Not Found"})),
        )
        .await;

    let discovery = service(&with_fallback(harness.config()))
        .discover_with_source()
        .await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
}

#[tokio::test]
async fn test_one_failing_root_discards_partial_result() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["1", "2"])).await;
    // "Archive" is not mounted, so the server answers 404.

    let mut config = with_fallback(harness.config());
    config.discovery.roots = vec!["Poetry".to_string(), "Archive".to_string()];

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
    assert_eq!(identities(&discovery), vec!["3", "1", "2"]);
}

#[tokio::test]
async fn test_unreachable_listing_uses_builtin_fallback() {
    let harness = TestHarness::start().await;
    let mut config = harness.config();
    config.discovery.listing_url = Some("http://127.0.0.1:9/contents".to_string());

    let discovery = service(&config).discover_with_source().await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
    assert_eq!(discovery.locators.len(), 74);
    assert_eq!(discovery.locators[0].container(), "Poetry/1");
}

#[tokio::test]
async fn test_no_listing_url_uses_fallback() {
    let harness = TestHarness::start().await;
    let discovery = service(&with_fallback(harness.config_without_listing()))
        .discover_with_source()
        .await;

    assert_eq!(discovery.source, DiscoverySource::Fallback);
    assert!(harness.server.received_requests().await.unwrap().is_empty());
}
