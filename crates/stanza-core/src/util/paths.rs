//! Site-relative path utilities.
//!
//! Paths inside the static file store are `/`-separated strings, not
//! filesystem paths, so these helpers work on `str` rather than `Path`.

/// Normalize a deployment prefix to `/segment[/segment...]` form.
///
/// Empty and all-slash inputs normalize to the empty prefix.
///
/// ```
/// use stanza_core::util::paths::normalize_prefix;
///
/// assert_eq!(normalize_prefix("poetry-site/"), "/poetry-site");
/// assert_eq!(normalize_prefix("/"), "");
/// ```
pub fn normalize_prefix(prefix: &str) -> String {
    let trimmed = prefix.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{trimmed}")
    }
}

/// Join a base path and site-relative segments with single slashes.
///
/// An empty base yields a relative path (`Poetry/7/image.png`); a non-empty
/// base yields a rooted one (`/poetry-site/Poetry/7/image.png`). Empty
/// segments are skipped.
///
/// ```
/// use stanza_core::util::paths::join_site_path;
///
/// assert_eq!(join_site_path("", &["Poetry/7", "image.png"]), "Poetry/7/image.png");
/// assert_eq!(
///     join_site_path("/poetry-site", &["Poetry/7/", "image.png"]),
///     "/poetry-site/Poetry/7/image.png"
/// );
/// ```
pub fn join_site_path(base: &str, segments: &[&str]) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(segments.len() + 1);
    let base = base.trim_matches('/');
    if !base.is_empty() {
        parts.push(base);
    }
    parts.extend(
        segments
            .iter()
            .map(|s| s.trim_matches('/'))
            .filter(|s| !s.is_empty()),
    );

    let joined = parts.join("/");
    if base.is_empty() {
        joined
    } else {
        format!("/{joined}")
    }
}

/// Strip the final extension from the last segment of a site path.
///
/// Dots in directory segments are left alone, as are dotfiles.
///
/// ```
/// use stanza_core::util::paths::strip_extension;
///
/// assert_eq!(strip_extension("Poetry/short/rain.md"), "Poetry/short/rain");
/// assert_eq!(strip_extension("v1.2/readme"), "v1.2/readme");
/// ```
pub fn strip_extension(path: &str) -> &str {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(0) | None => path,
        Some(dot) => &path[..name_start + dot],
    }
}

/// The extension of the last segment of a site path, if any.
pub fn extension(path: &str) -> Option<&str> {
    let name_start = path.rfind('/').map_or(0, |i| i + 1);
    match path[name_start..].rfind('.') {
        Some(0) | None => None,
        Some(dot) => Some(&path[name_start + dot + 1..]),
    }
}
