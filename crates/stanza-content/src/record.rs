//! Canonical content records and the record normalizer.

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use stanza_core::ContentLocator;

use crate::metadata::{MetadataField, PoemMetadata};

/// The canonical, normalized representation of one poem.
///
/// Fields are private so a record cannot change after [`normalize`] builds
/// it; a new pipeline pass produces a new collection instead.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentRecord {
    identity: String,
    title: String,
    author: String,
    language: String,
    form: String,
    length: String,
    body: String,
    asset_path: String,
    container_path: String,
    extra: BTreeMap<String, String>,
    defaulted: BTreeSet<MetadataField>,
}

impl ContentRecord {
    /// Identity derived from the container path; unique within one pass.
    pub fn identity(&self) -> &str {
        &self.identity
    }

    /// Title, `"Untitled"` when absent.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Author, `"Unknown Author"` when absent.
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Language, `"unknown"` when absent.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Form, `"unknown"` when absent.
    pub fn form(&self) -> &str {
        &self.form
    }

    /// Length category, `"unknown"` when absent.
    pub fn length(&self) -> &str {
        &self.length
    }

    /// Document text minus frontmatter, trimmed.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Site path of the companion image; empty when none was found.
    pub fn asset_path(&self) -> &str {
        &self.asset_path
    }

    /// Whether an image was found.
    pub fn has_asset(&self) -> bool {
        !self.asset_path.is_empty()
    }

    /// The locator's container path.
    pub fn container_path(&self) -> &str {
        &self.container_path
    }

    /// Metadata keys with no named field.
    pub fn extra(&self) -> &BTreeMap<String, String> {
        &self.extra
    }

    /// Fields that fell back to their default value.
    pub fn defaulted(&self) -> &BTreeSet<MetadataField> {
        &self.defaulted
    }

    /// Whether `field` fell back to its default value.
    pub fn is_defaulted(&self, field: MetadataField) -> bool {
        self.defaulted.contains(&field)
    }

    /// The body split into blank-line-delimited stanzas.
    pub fn stanzas(&self) -> Vec<&str> {
        let mut stanzas = Vec::new();
        let mut start: Option<usize> = None;
        let mut end = 0;
        let mut offset = 0;

        for line in self.body.split_inclusive('\n') {
            if line.trim().is_empty() {
                if let Some(s) = start.take() {
                    stanzas.push(self.body[s..end].trim_end());
                }
            } else {
                start.get_or_insert(offset);
                end = offset + line.len();
            }
            offset += line.len();
        }
        if let Some(s) = start {
            stanzas.push(self.body[s..end].trim_end());
        }
        stanzas
    }
}

/// Merge a locator, typed metadata, body, and resolved asset path into a
/// [`ContentRecord`].
///
/// Pure and deterministic: identity comes from the locator's container path,
/// missing fields take their defaults, and the body is trimmed.
///
/// # Example
///
/// ```rust
/// use stanza_content::{normalize, PoemMetadata};
/// use stanza_core::ContentLocator;
///
/// let locator = ContentLocator::numbered("Poetry", "7", "poem.md");
/// let record = normalize(&locator, &PoemMetadata::default(), "  text \n", "");
///
/// assert_eq!(record.identity(), "7");
/// assert_eq!(record.title(), "Untitled");
/// assert_eq!(record.author(), "Unknown Author");
/// assert_eq!(record.body(), "text");
/// assert!(!record.has_asset());
/// ```
pub fn normalize(
    locator: &ContentLocator,
    metadata: &PoemMetadata,
    body: &str,
    asset_path: &str,
) -> ContentRecord {
    let mut defaulted = BTreeSet::new();
    let mut resolve = |field: MetadataField| match metadata.field(field) {
        Some(value) => value.to_string(),
        None => {
            defaulted.insert(field);
            field.default_value().to_string()
        }
    };

    let title = resolve(MetadataField::Title);
    let author = resolve(MetadataField::Author);
    let language = resolve(MetadataField::Language);
    let form = resolve(MetadataField::Form);
    let length = resolve(MetadataField::Length);

    ContentRecord {
        identity: locator.identity().to_string(),
        title,
        author,
        language,
        form,
        length,
        body: body.trim().to_string(),
        asset_path: asset_path.to_string(),
        container_path: locator.container().to_string(),
        extra: metadata.extra.clone(),
        defaulted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frontmatter::parse;

    fn record_for(raw: &str, asset: &str) -> ContentRecord {
        let doc = parse(raw);
        let meta = PoemMetadata::from_frontmatter(&doc.metadata);
        let locator = ContentLocator::numbered("Poetry", "7", "poem.md");
        normalize(&locator, &meta, &doc.body, asset)
    }

    #[test]
    fn test_normalize_full_metadata() {
        let record = record_for(
            "---\ntitle: \"Kogarashi\"\nauthor: Basho\nlanguage: ja\nform: haiku\nlength: short\n---\nWinter wind",
            "Poetry/7/image.png",
        );

        assert_eq!(record.identity(), "7");
        assert_eq!(record.title(), "Kogarashi");
        assert_eq!(record.author(), "Basho");
        assert_eq!(record.language(), "ja");
        assert_eq!(record.form(), "haiku");
        assert_eq!(record.length(), "short");
        assert_eq!(record.body(), "Winter wind");
        assert_eq!(record.asset_path(), "Poetry/7/image.png");
        assert_eq!(record.container_path(), "Poetry/7");
        assert!(record.defaulted().is_empty());
    }

    #[test]
    fn test_normalize_defaults() {
        let record = record_for("Just a poem", "");

        assert_eq!(record.title(), "Untitled");
        assert_eq!(record.author(), "Unknown Author");
        assert_eq!(record.language(), "unknown");
        assert_eq!(record.form(), "unknown");
        assert_eq!(record.length(), "unknown");
        assert_eq!(record.body(), "Just a poem");
        assert!(!record.has_asset());
        assert_eq!(record.defaulted().len(), 5);
        assert!(record.is_defaulted(MetadataField::Title));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        let doc = parse("---\ntitle: Same\nextra_key: v\n---\nbody");
        let meta = PoemMetadata::from_frontmatter(&doc.metadata);
        let locator = ContentLocator::numbered("Poetry", "2", "poem.md");

        let a = normalize(&locator, &meta, &doc.body, "Poetry/2/image.jpg");
        let b = normalize(&locator, &meta, &doc.body, "Poetry/2/image.jpg");
        assert_eq!(a, b);
    }

    #[test]
    fn test_identity_ignores_document_filename() {
        let meta = PoemMetadata::default();
        let a = normalize(&ContentLocator::numbered("Poetry", "1", "poem.md"), &meta, "", "");
        let b = normalize(&ContentLocator::numbered("Poetry", "2", "poem.md"), &meta, "", "");
        assert_ne!(a.identity(), b.identity());
    }

    #[test]
    fn test_extra_carried_through() {
        let record = record_for("---\nmood: quiet\n---\nx", "");
        assert_eq!(record.extra().get("mood").map(String::as_str), Some("quiet"));
    }

    #[test]
    fn test_stanzas() {
        let record = record_for("---\ntitle: S\n---\nOne a\nOne b\n\n\nTwo a\n  \nThree", "");
        assert_eq!(record.stanzas(), vec!["One a\nOne b", "Two a", "Three"]);
    }

    #[test]
    fn test_stanzas_empty_body() {
        let record = record_for("", "");
        assert!(record.stanzas().is_empty());
    }

    #[test]
    fn test_record_serializes_to_json() {
        let record = record_for("---\ntitle: J\n---\nx", "");
        let json = serde_json::to_value(&record).unwrap_or_default();
        assert_eq!(json["title"], "J");
        assert_eq!(json["identity"], "7");
        assert_eq!(json["defaulted"][0], "author");
    }
}
