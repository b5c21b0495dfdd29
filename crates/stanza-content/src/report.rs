//! Collection validation and statistics.
//!
//! Works on a finished record collection, so it sees exactly what a reader of
//! the site would: defaulted metadata, empty poems, and poems still waiting
//! for an image.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::metadata::MetadataField;
use crate::record::ContentRecord;

/// A single problem found in one record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// One or more named metadata fields fell back to defaults.
    MissingMetadata {
        /// Record identity.
        identity: String,
        /// Fields that were absent.
        fields: Vec<MetadataField>,
    },
    /// The poem body is empty.
    EmptyBody {
        /// Record identity.
        identity: String,
    },
    /// No companion image was found.
    MissingImage {
        /// Record identity.
        identity: String,
    },
}

impl Issue {
    /// Identity of the record the issue belongs to.
    pub fn identity(&self) -> &str {
        match self {
            Issue::MissingMetadata { identity, .. }
            | Issue::EmptyBody { identity }
            | Issue::MissingImage { identity } => identity,
        }
    }
}

/// Result of validating a record collection.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Number of records inspected.
    pub records: usize,
    /// Issues found, in record order.
    pub issues: Vec<Issue>,
}

impl ValidationReport {
    /// Whether no issues were found.
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }

    /// Issues with missing metadata.
    pub fn missing_metadata(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::MissingMetadata { .. }))
    }

    /// Issues with an empty body.
    pub fn empty_bodies(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::EmptyBody { .. }))
    }

    /// Issues with no image.
    pub fn missing_images(&self) -> impl Iterator<Item = &Issue> {
        self.issues
            .iter()
            .filter(|i| matches!(i, Issue::MissingImage { .. }))
    }
}

/// Check every record for defaulted metadata, empty bodies, and missing
/// images.
pub fn validate(records: &[ContentRecord]) -> ValidationReport {
    let mut issues = Vec::new();

    for record in records {
        let identity = record.identity().to_string();

        let missing: Vec<MetadataField> = MetadataField::ALL
            .into_iter()
            .filter(|f| record.is_defaulted(*f))
            .collect();
        if !missing.is_empty() {
            issues.push(Issue::MissingMetadata {
                identity: identity.clone(),
                fields: missing,
            });
        }
        if record.body().is_empty() {
            issues.push(Issue::EmptyBody {
                identity: identity.clone(),
            });
        }
        if !record.has_asset() {
            issues.push(Issue::MissingImage { identity });
        }
    }

    ValidationReport {
        records: records.len(),
        issues,
    }
}

/// Counts over a record collection.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CollectionStats {
    /// Total records.
    pub total: usize,
    /// Records with a resolved image.
    pub with_images: usize,
    /// Records by language.
    pub by_language: BTreeMap<String, usize>,
    /// Records by form.
    pub by_form: BTreeMap<String, usize>,
    /// Records by length category.
    pub by_length: BTreeMap<String, usize>,
    /// Records by author.
    pub by_author: BTreeMap<String, usize>,
}

impl CollectionStats {
    /// Tally a record collection.
    pub fn from_records(records: &[ContentRecord]) -> Self {
        let mut stats = Self {
            total: records.len(),
            ..Self::default()
        };

        for record in records {
            if record.has_asset() {
                stats.with_images += 1;
            }
            *stats.by_language.entry(record.language().to_string()).or_default() += 1;
            *stats.by_form.entry(record.form().to_string()).or_default() += 1;
            *stats.by_length.entry(record.length().to_string()).or_default() += 1;
            *stats.by_author.entry(record.author().to_string()).or_default() += 1;
        }
        stats
    }

    /// Records without a resolved image.
    pub fn without_images(&self) -> usize {
        self.total - self.with_images
    }

    /// Percentage of records with an image; `0.0` for an empty collection.
    pub fn image_coverage(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.with_images as f64 / self.total as f64 * 100.0
        }
    }
}
