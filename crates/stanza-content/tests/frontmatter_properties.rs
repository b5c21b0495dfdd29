//! Property-based tests for frontmatter parsing and normalization.

#![allow(clippy::unwrap_used)]

use proptest::prelude::*;
use stanza_content::{PoemMetadata, normalize, parse};
use stanza_core::ContentLocator;

/// Keys: identifier-like, no colon, no surrounding whitespace.
fn key() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9_]{0,11}"
}

/// Values: printable, may contain colons, no newlines or quotes.
fn value() -> impl Strategy<Value = String> {
    "[A-Za-z0-9 :/._-]{0,24}".prop_map(|s| s.trim().to_string())
}

/// Body lines that can never be mistaken for a delimiter.
fn body() -> impl Strategy<Value = String> {
    prop::collection::vec("[A-Za-z ,.]{0,30}", 0..6).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn test_well_formed_block_yields_declared_keys(
        fields in prop::collection::btree_map(key(), value(), 0..8),
        quote_double in any::<bool>(),
        text in body(),
    ) {
        let quote = if quote_double { '"' } else { '\'' };
        let mut raw = String::from("---\n");
        for (k, v) in &fields {
            raw.push_str(&format!("{k}: {quote}{v}{quote}\n"));
        }
        raw.push_str("---\n");
        raw.push_str(&text);

        let doc = parse(&raw);
        prop_assert_eq!(doc.metadata.len(), fields.len());
        for (k, v) in &fields {
            prop_assert_eq!(doc.metadata.get(k), Some(v.as_str()));
        }
        prop_assert_eq!(doc.body, text.trim());
    }

    #[test]
    fn test_document_without_block_is_all_body(text in body()) {
        let raw = format!("\n{text}\n");
        let doc = parse(&raw);
        prop_assert!(doc.metadata.is_empty());
        prop_assert_eq!(doc.body, raw.trim());
    }

    #[test]
    fn test_parse_never_panics(raw in "\\PC{0,200}") {
        let _ = parse(&raw);
    }

    #[test]
    fn test_normalize_is_deterministic(
        n in 1u32..10_000,
        title in prop::option::of("[A-Za-z ]{1,20}"),
        text in body(),
    ) {
        let mut raw = String::from("---\n");
        if let Some(t) = &title {
            raw.push_str(&format!("title: \"{t}\"\n"));
        }
        raw.push_str("---\n");
        raw.push_str(&text);

        let doc = parse(&raw);
        let meta = PoemMetadata::from_frontmatter(&doc.metadata);
        let locator = ContentLocator::numbered("Poetry", &n.to_string(), "poem.md");

        let a = normalize(&locator, &meta, &doc.body, "");
        let b = normalize(&locator, &meta, &doc.body, "");
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(a.identity(), n.to_string());
    }
}
