//! End-to-end pipeline passes over HTTP.

use serde_json::json;
use stanza_client::config::Layout;
use stanza_client::{DiscoverySource, Pipeline, RunSummary};
use stanza_content::{CollectionStats, validate};

use crate::common::{TestHarness, dirs, poem};

#[tokio::test]
async fn test_single_container_with_png() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["7"])).await;
    harness
        .document("Poetry/7/poem.md", "---\ntitle: \"Kogarashi\"\n---\nThe winter wind")
        .await;
    harness.asset("Poetry/7/image.png").await;

    let pipeline = Pipeline::from_config(&harness.config()).unwrap();
    let records = pipeline.run(None).await;

    assert_eq!(records.len(), 1);
    let record = &records[0];
    assert_eq!(record.identity(), "7");
    assert_eq!(record.title(), "Kogarashi");
    assert_eq!(record.author(), "Unknown Author");
    assert_eq!(record.body(), "The winter wind");
    assert!(record.asset_path().ends_with("7/image.png"));
    assert_eq!(record.container_path(), "Poetry/7");
}

#[tokio::test]
async fn test_legacy_document_without_declared_image_finds_container_image() {
    let harness = TestHarness::start().await;
    harness
        .listing("Poetry/short", json!([{"name": "rain.md", "type": "file"}]))
        .await;
    harness
        .document("Poetry/short/rain.md", &poem("Rain", "Drops"))
        .await;
    harness.asset("Poetry/short/rain/image.png").await;

    let mut config = harness.config();
    config.discovery.layout = Layout::Legacy;
    config.discovery.roots = vec!["Poetry/short".to_string()];

    let records = Pipeline::from_config(&config).unwrap().run(None).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].identity(), "Poetry/short/rain");
    assert!(records[0].asset_path().ends_with("Poetry/short/rain/image.png"));
}

#[tokio::test]
async fn test_document_without_metadata_gets_defaults() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["1"])).await;
    harness
        .document("Poetry/1/poem.md", "just a line\n\nand another")
        .await;

    let pipeline = Pipeline::from_config(&harness.config()).unwrap();
    let records = pipeline.run(None).await;

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].title(), "Untitled");
    assert_eq!(records[0].author(), "Unknown Author");
    assert_eq!(records[0].language(), "unknown");
    assert_eq!(records[0].body(), "just a line\n\nand another");
    assert_eq!(records[0].asset_path(), "");
}

#[tokio::test]
async fn test_failed_items_are_skipped_in_order() {
    let harness = TestHarness::start().await;
    harness
        .listing("Poetry", dirs(&["10", "7", "2", "notes"]))
        .await;
    harness.document("Poetry/2/poem.md", &poem("Two", "b")).await;
    harness.document("Poetry/7/poem.md", &poem("Seven", "g")).await;
    harness.document_status("Poetry/10/poem.md", 500).await;
    harness.asset("Poetry/7/image.png").await;

    let pipeline = Pipeline::from_config(&harness.config()).unwrap();
    let report = pipeline.run_report(None).await;

    let titles: Vec<_> = report.records.iter().map(|r| r.title()).collect();
    assert_eq!(titles, vec!["Two", "Seven"]);
    assert_eq!(
        report.summary,
        RunSummary {
            source: DiscoverySource::Remote,
            discovered: 3,
            attempted: 3,
            loaded: 2,
            skipped: 1,
        }
    );

    let stats = CollectionStats::from_records(&report.records);
    assert_eq!(stats.with_images, 1);
    assert_eq!(stats.by_form.get("haiku"), Some(&2));
    assert_eq!(validate(&report.records).missing_images().count(), 1);
}

#[tokio::test]
async fn test_limit_over_fallback() {
    let harness = TestHarness::start().await;
    for n in 1..=10 {
        harness
            .document(&format!("Poetry/{n}/poem.md"), &poem(&format!("P{n}"), "x"))
            .await;
    }
    let mut config = harness.config_without_listing();
    config.discovery.fallback = (1..=10).map(|n| format!("Poetry/{n}")).collect();

    let pipeline = Pipeline::from_config(&config).unwrap();
    let report = pipeline.run_report(Some(2)).await;

    let ids: Vec<_> = report.records.iter().map(|r| r.identity()).collect();
    assert_eq!(ids, vec!["1", "2"]);
    assert_eq!(report.summary.source, DiscoverySource::Fallback);
    assert_eq!(report.summary.discovered, 10);
    assert_eq!(report.summary.attempted, 2);
}

#[tokio::test]
async fn test_all_fetches_failing_yields_empty() {
    let harness = TestHarness::start().await;
    let mut config = harness.config_without_listing();
    config.discovery.fallback = vec!["Poetry/1".to_string(), "Poetry/2".to_string()];

    let pipeline = Pipeline::from_config(&config).unwrap();
    let report = pipeline.run_report(None).await;

    assert!(report.records.is_empty());
    assert_eq!(report.summary.skipped, 2);
}

#[tokio::test]
async fn test_concurrency_of_one_keeps_order() {
    let harness = TestHarness::start().await;
    harness.listing("Poetry", dirs(&["3", "1", "2"])).await;
    for n in 1..=3 {
        harness
            .document(&format!("Poetry/{n}/poem.md"), &poem(&format!("P{n}"), "x"))
            .await;
    }
    let mut config = harness.config();
    config.pipeline.concurrency = 1;

    let records = Pipeline::from_config(&config).unwrap().run(None).await;
    let titles: Vec<_> = records.iter().map(|r| r.title()).collect();

    assert_eq!(titles, vec!["P1", "P2", "P3"]);
}
