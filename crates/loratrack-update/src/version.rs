//! Version normalisation and comparison
//!
//! Release tags and user-supplied versions are coerced into a canonical
//! tag of the form `vMAJOR.MINOR.PATCH[-PRERELEASE]` before comparison.
//! An empty canonical form means "not semver" (e.g. a `dev` build).

use semver::Version;
use std::cmp::Ordering;

/// Normalise a release tag.
///
/// Bare semver gains a `v` prefix, canonical tags pass through, and anything
/// else is returned unchanged so later validity checks can reject it.
pub fn normalize_tag(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }
    if Version::parse(raw).is_ok() {
        return format!("v{}", raw);
    }
    raw.to_string()
}

/// Normalise a user-supplied version such as `1.2.3`, `v1.2.3` or `dev`.
///
/// Returns the canonical tag, or an empty string when the input is not semver.
pub fn normalize_version(raw: &str) -> String {
    let trimmed = raw.trim();
    let bare = trimmed.strip_prefix('v').unwrap_or(trimmed);
    match Version::parse(bare) {
        Ok(_) => format!("v{}", bare),
        Err(_) => String::new(),
    }
}

/// Parse a canonical tag (`v` prefix required)
pub fn parse_tag(tag: &str) -> Option<Version> {
    tag.strip_prefix('v')
        .and_then(|bare| Version::parse(bare).ok())
}

/// Whether `tag` is a canonical tag
pub fn is_canonical(tag: &str) -> bool {
    parse_tag(tag).is_some()
}

/// Compare two canonical tags by semver precedence
///
/// Returns `None` if either side is not canonical.
pub fn compare_tags(a: &str, b: &str) -> Option<Ordering> {
    Some(parse_tag(a)?.cmp_precedence(&parse_tag(b)?))
}

/// Whether `latest` should be offered as an update over `current`
///
/// `current` is normalised first; a non-semver current version treats any
/// canonical `latest` as newer.
pub fn is_update(latest: &str, current: &str) -> bool {
    if !is_canonical(latest) {
        return false;
    }
    let current = normalize_version(current);
    if current.is_empty() {
        return true;
    }
    compare_tags(latest, &current) == Some(Ordering::Greater)
}

/// Strip the leading `v` from a canonical tag for use in artifact names
pub fn tag_to_version(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
