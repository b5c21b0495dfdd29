//! Typed poem metadata.
//!
//! The frontmatter of a poem is an open key/value mapping. [`PoemMetadata`]
//! pulls out the keys the collection knows about into named optional fields
//! and keeps everything else in an ordered extension bag, so unknown keys
//! written by newer tools survive a round through the pipeline.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::frontmatter::Frontmatter;

/// Metadata fields with a defined meaning and a default value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetadataField {
    /// `title`
    Title,
    /// `author`
    Author,
    /// `language`
    Language,
    /// `form`
    Form,
    /// `length`
    Length,
}

impl MetadataField {
    /// Every defaulted field, in display order.
    pub const ALL: [MetadataField; 5] = [
        MetadataField::Title,
        MetadataField::Author,
        MetadataField::Language,
        MetadataField::Form,
        MetadataField::Length,
    ];

    /// The frontmatter key for this field.
    pub fn key(self) -> &'static str {
        match self {
            MetadataField::Title => "title",
            MetadataField::Author => "author",
            MetadataField::Language => "language",
            MetadataField::Form => "form",
            MetadataField::Length => "length",
        }
    }

    /// Value used when the document does not provide one.
    pub fn default_value(self) -> &'static str {
        match self {
            MetadataField::Title => "Untitled",
            MetadataField::Author => "Unknown Author",
            MetadataField::Language | MetadataField::Form | MetadataField::Length => "unknown",
        }
    }
}

impl fmt::Display for MetadataField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Frontmatter keys consumed by [`PoemMetadata`] rather than kept as extras.
const KNOWN_KEYS: [&str; 6] = ["title", "author", "language", "form", "length", "image"];

/// Poem metadata with named optional fields and an extension bag.
///
/// Empty and whitespace-only values count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PoemMetadata {
    /// Poem title.
    pub title: Option<String>,
    /// Author name.
    pub author: Option<String>,
    /// Language code, e.g. `en` or `hi`.
    pub language: Option<String>,
    /// Poetic form, e.g. `sonnet` or `free_verse`.
    pub form: Option<String>,
    /// Length category, e.g. `short` or `standard`.
    pub length: Option<String>,
    /// Declared image filename (legacy layout).
    pub image: Option<String>,
    /// Every other key, verbatim.
    pub extra: BTreeMap<String, String>,
}

impl PoemMetadata {
    /// Build typed metadata from a parsed frontmatter mapping.
    pub fn from_frontmatter(fields: &Frontmatter) -> Self {
        let pick = |key: &str| {
            fields
                .get(key)
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let extra = fields
            .iter()
            .filter(|(k, _)| !KNOWN_KEYS.contains(k))
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        Self {
            title: pick("title"),
            author: pick("author"),
            language: pick("language"),
            form: pick("form"),
            length: pick("length"),
            image: pick("image"),
            extra,
        }
    }

    /// The value of a defaulted field, if the document provided one.
    pub fn field(&self, field: MetadataField) -> Option<&str> {
        match field {
            MetadataField::Title => self.title.as_deref(),
            MetadataField::Author => self.author.as_deref(),
            MetadataField::Language => self.language.as_deref(),
            MetadataField::Form => self.form.as_deref(),
            MetadataField::Length => self.length.as_deref(),
        }
    }
}

impl From<&Frontmatter> for PoemMetadata {
    fn from(fields: &Frontmatter) -> Self {
        Self::from_frontmatter(fields)
    }
}
