//! Slug derivation and validation for articles.
//!
//! Slugs are trimmed, non-empty identifiers composed of lowercase ASCII
//! letters, digits, and single hyphens between words.

use uuid::Uuid;

/// Upper bound for the title-derived part of a slug.
pub(crate) const MAX_BASE_LEN: usize = 120;
/// Length of the random suffix appended on collision.
pub(crate) const SUFFIX_LEN: usize = 8;
const FALLBACK_SLUG: &str = "article";

/// Return `true` when `value` is a valid article slug.
pub(crate) fn is_valid_slug(value: &str) -> bool {
    !value.is_empty()
        && !value.starts_with('-')
        && !value.ends_with('-')
        && !value.contains("--")
        && value
            .chars()
            .all(|ch| ch.is_ascii_lowercase() || ch.is_ascii_digit() || ch == '-')
}

/// Lowercase the ASCII alphanumerics of `title`, joining word runs with `-`.
///
/// Titles without any ASCII alphanumerics fall back to `article`.
pub(crate) fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len().min(MAX_BASE_LEN));
    let mut pending_separator = false;
    for ch in title.chars() {
        if !ch.is_ascii_alphanumeric() {
            pending_separator = true;
            continue;
        }
        let separate = pending_separator && !slug.is_empty();
        if slug.len() + usize::from(separate) + 1 > MAX_BASE_LEN {
            break;
        }
        if separate {
            slug.push('-');
        }
        pending_separator = false;
        slug.push(ch.to_ascii_lowercase());
    }
    let trimmed = slug.trim_end_matches('-');
    if trimmed.is_empty() {
        FALLBACK_SLUG.to_owned()
    } else {
        trimmed.to_owned()
    }
}

/// Append a random hexadecimal suffix to `base`.
pub(crate) fn with_random_suffix(base: &str) -> String {
    let suffix: String = Uuid::new_v4()
        .simple()
        .to_string()
        .chars()
        .take(SUFFIX_LEN)
        .collect();
    format!("{base}-{suffix}")
}
