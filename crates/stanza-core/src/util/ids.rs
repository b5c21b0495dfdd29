//! Identity utilities.
//!
//! Record identities are derived from container paths, never from document
//! filenames: every numbered container holds a file called `poem.md`, so the
//! filename carries no identity at all.

use std::cmp::Ordering;

/// Returns `true` if `name` is a non-empty run of ASCII digits.
pub fn is_numeric_name(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_digit())
}

/// Compare two digit strings by numeric value, without parsing.
///
/// Leading zeros are ignored, so names of any length compare correctly.
/// Names with equal value (`7` and `007`) compare equal; callers break the
/// tie on the full path.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use stanza_core::util::ids::compare_numeric;
///
/// assert_eq!(compare_numeric("2", "10"), Ordering::Less);
/// assert_eq!(compare_numeric("99999999999999999999999", "1"), Ordering::Greater);
/// assert_eq!(compare_numeric("007", "7"), Ordering::Equal);
/// ```
pub fn compare_numeric(a: &str, b: &str) -> Ordering {
    let a = a.trim_start_matches('0');
    let b = b.trim_start_matches('0');
    a.len().cmp(&b.len()).then_with(|| a.cmp(b))
}

/// Derive a record identity from a container path.
///
/// The identity is the container path in canonical form: no leading,
/// trailing, or repeated slashes. Two containers share an identity only if
/// they are the same container.
///
/// # Examples
///
/// ```
/// use stanza_core::util::ids::container_identity;
///
/// assert_eq!(container_identity("/Poetry//7/"), "Poetry/7");
/// assert_eq!(
///     container_identity("Poetry/forms/sonnet/Night_Rain"),
///     "Poetry/forms/sonnet/Night_Rain"
/// );
/// ```
pub fn container_identity(container: &str) -> String {
    container
        .trim()
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}
