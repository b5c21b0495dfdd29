//! Built-in fallback lists.
//!
//! Used when the listing API is not configured or cannot be reached, and no
//! `discovery.fallback` list is set in the config.

/// Number of containers in the built-in numbered collection.
pub const NUMBERED_FALLBACK_COUNT: u32 = 74;

/// Root holding the built-in numbered collection.
pub const NUMBERED_FALLBACK_ROOT: &str = "Poetry";

/// Built-in legacy documents, in display order.
pub const LEGACY_FALLBACK: &[&str] = &[
    "Poetry/by_language/english/lengths/short/a-leaf-in-a-sea-of-green_a-leaf-in-a-sea-of_short_en.md",
    "Poetry/by_language/english/lengths/short/a-light-that-never-goes-out_there-is-a-light-that_short_en.md",
    "Poetry/by_language/english/lengths/short/jupiter-shone-different_in-a-sky-filled-with_short_en.md",
];

/// Container paths of the built-in numbered collection: `Poetry/1` through
/// `Poetry/74`.
pub fn numbered_containers() -> Vec<String> {
    (1..=NUMBERED_FALLBACK_COUNT)
        .map(|n| format!("{NUMBERED_FALLBACK_ROOT}/{n}"))
        .collect()
}

/// Document paths of the built-in legacy collection.
pub fn legacy_documents() -> Vec<String> {
    LEGACY_FALLBACK.iter().map(|d| d.to_string()).collect()
}
