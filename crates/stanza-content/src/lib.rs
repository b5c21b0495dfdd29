//! Frontmatter parsing, typed poem metadata, and record normalization.
//!
//! This crate holds the pure half of the Stanza pipeline: everything that
//! turns fetched text into records without touching the network.
//!
//! # Modules
//!
//! - [`frontmatter`]: `---`-delimited `key: value` block extraction
//! - [`metadata`]: Typed [`PoemMetadata`] with an extension bag
//! - [`record`]: [`ContentRecord`] and the [`normalize`] step
//! - [`report`]: Collection validation and statistics
//!
//! # Example
//!
//! ```rust
//! use stanza_content::{normalize, parse, PoemMetadata};
//! use stanza_core::ContentLocator;
//!
//! let raw = "---\ntitle: \"Kogarashi\"\n---\nThe winter wind";
//! let doc = parse(raw);
//! let meta = PoemMetadata::from_frontmatter(&doc.metadata);
//! let locator = ContentLocator::numbered("Poetry", "7", "poem.md");
//!
//! let record = normalize(&locator, &meta, &doc.body, "Poetry/7/image.png");
//! assert_eq!(record.identity(), "7");
//! assert_eq!(record.title(), "Kogarashi");
//! ```

#![forbid(unsafe_code)]

pub mod frontmatter;
pub mod metadata;
pub mod record;
pub mod report;

// Re-export commonly used types
pub use frontmatter::{
    Frontmatter, FrontmatterResult, ParsedDocument, extract_frontmatter, parse, strip_frontmatter,
};
pub use metadata::{MetadataField, PoemMetadata};
pub use record::{ContentRecord, normalize};
pub use report::{CollectionStats, Issue, ValidationReport, validate};
