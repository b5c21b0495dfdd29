//! Frontmatter extraction from poem documents.
//!
//! Frontmatter is line-oriented metadata at the start of a document,
//! delimited by lines that hold exactly `---` (no indentation or trailing
//! spaces):
//!
//! ```text
//! ---
//! title: "Kogarashi"
//! author: Manas Pandey
//! source: https://example.com/kogarashi
//! ---
//! The winter wind
//! strips the last persimmon.
//! ```
//!
//! This is deliberately not YAML. Each line is split on its first `:` only,
//! so values such as URLs and paths survive intact, and a single pair of
//! matching quotes is stripped from the value. Extraction never fails:
//! anything it cannot make sense of degrades to "no metadata, whole text is
//! body".
//!
//! # Usage
//!
//! ```rust
//! use stanza_content::frontmatter::extract_frontmatter;
//!
//! let content = "---\ntitle: 'Test'\n---\n\nBody";
//! let result = extract_frontmatter(content);
//!
//! assert!(result.has_frontmatter());
//! assert_eq!(result.get_str("title"), Some("Test"));
//! assert_eq!(result.body(), "Body");
//! ```

use std::collections::BTreeMap;

use serde::Serialize;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// Parsed metadata block: metadata key to string value.
///
/// Keys are case-sensitive and trimmed. When a key repeats, the last
/// occurrence wins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Frontmatter(BTreeMap<String, String>);

impl Frontmatter {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up a value by key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    /// Whether a key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Insert or replace a value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    /// Number of keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping is empty.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over key/value pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Take ownership of the underlying map.
    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Frontmatter {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Result of frontmatter extraction.
///
/// Borrows the body from the input; see [`ParsedDocument`] for an owned
/// form.
#[derive(Debug, Clone)]
pub struct FrontmatterResult<'a> {
    /// Parsed metadata (empty when no block was found).
    fields: Frontmatter,
    /// Trimmed body content after the block.
    body: &'a str,
    /// Whether both delimiters were found.
    had_delimiters: bool,
}

impl<'a> FrontmatterResult<'a> {
    fn with_frontmatter(fields: Frontmatter, body: &'a str) -> Self {
        Self {
            fields,
            body,
            had_delimiters: true,
        }
    }

    fn without_frontmatter(body: &'a str) -> Self {
        Self {
            fields: Frontmatter::new(),
            body,
            had_delimiters: false,
        }
    }

    /// Check if at least one metadata key was parsed.
    pub fn has_frontmatter(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Check if an opening and a closing delimiter were both present.
    pub fn had_delimiters(&self) -> bool {
        self.had_delimiters
    }

    /// The parsed metadata.
    pub fn fields(&self) -> &Frontmatter {
        &self.fields
    }

    /// Get a string field from the frontmatter.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.fields.get(key)
    }

    /// Get the trimmed body content (everything after the block).
    pub fn body(&self) -> &'a str {
        self.body
    }

    /// Convert into an owned [`ParsedDocument`].
    pub fn into_document(self) -> ParsedDocument {
        ParsedDocument {
            metadata: self.fields,
            body: self.body.to_string(),
        }
    }
}

/// Owned result of [`parse`]: the metadata block and the trimmed body.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedDocument {
    /// Parsed metadata block.
    pub metadata: Frontmatter,
    /// Document minus frontmatter, trimmed.
    pub body: String,
}

/// Extract frontmatter from document content.
///
/// # Behavior
///
/// - The first line must be exactly `---` (surrounding whitespace and a
///   leading byte-order mark are tolerated); otherwise there is no block and
///   the body is the whole trimmed text.
/// - The block ends at the next `---` line. Without one, a warning is logged
///   and the whole trimmed text is the body.
/// - Inside the block, lines without a `:` are ignored.
///
/// # Example
///
/// ```rust
/// use stanza_content::frontmatter::extract_frontmatter;
///
/// let content = "---\nsource: \"https://example.com/a:b\"\n---\n\nBody";
/// let result = extract_frontmatter(content);
/// assert_eq!(result.get_str("source"), Some("https://example.com/a:b"));
///
/// let content = "  Just a poem  \n";
/// let result = extract_frontmatter(content);
/// assert!(!result.had_delimiters());
/// assert_eq!(result.body(), "Just a poem");
/// ```
pub fn extract_frontmatter(content: &str) -> FrontmatterResult<'_> {
    let text = content.strip_prefix(BOM).unwrap_or(content);
    let mut lines = text.split_inclusive('\n');

    match lines.next() {
        Some(first) if is_delimiter(first) => {
            let block_start = first.len();
            let mut offset = block_start;
            for line in lines {
                if is_delimiter(line) {
                    let fields = parse_block(&text[block_start..offset]);
                    let body = &text[offset + line.len()..];
                    return FrontmatterResult::with_frontmatter(fields, body.trim());
                }
                offset += line.len();
            }
            log::warn!("Frontmatter opening delimiter found but no closing delimiter");
            FrontmatterResult::without_frontmatter(text.trim())
        }
        _ => FrontmatterResult::without_frontmatter(text.trim()),
    }
}

/// Parse a raw document into its metadata block and trimmed body.
///
/// Total: malformed input yields an empty mapping and the whole trimmed text
/// as body.
pub fn parse(raw: &str) -> ParsedDocument {
    extract_frontmatter(raw).into_document()
}

/// Strip frontmatter from content, returning only the trimmed body.
///
/// # Example
///
/// ```rust
/// use stanza_content::frontmatter::strip_frontmatter;
///
/// let content = "---\ntitle: Test\n---\n\nFirst line\nSecond line";
/// assert_eq!(strip_frontmatter(content), "First line\nSecond line");
/// ```
pub fn strip_frontmatter(content: &str) -> &str {
    extract_frontmatter(content).body()
}

/// A delimiter line holds exactly `---`; only the line terminator is ignored.
fn is_delimiter(line: &str) -> bool {
    line.trim_end_matches(['\r', '\n']) == DELIMITER
}

fn parse_block(block: &str) -> Frontmatter {
    let mut fields = Frontmatter::new();
    for line in block.lines() {
        let Some((key, value)) = line.trim().split_once(':') else {
            continue;
        };
        let key = key.trim();
        if key.is_empty() {
            continue;
        }
        fields.insert(key, unquote(value.trim()));
    }
    fields
}

/// Strip one pair of matching surrounding quotes, single or double.
fn unquote(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

// ============================================================================
// Tests
// ============================================================================
