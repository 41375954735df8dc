// src/services/slug.rs

//! Show name to slug normalization.

/// Slug used when no show identity can be recovered.
pub const UNKNOWN_SHOW: &str = "unknown-show";

/// Normalize free text into a show slug.
///
/// Lowercases, drops everything except `[a-z0-9]`, whitespace and `-`,
/// turns whitespace runs into a single hyphen, collapses hyphen runs and trims
/// hyphens from both ends. Falls back to [`UNKNOWN_SHOW`] when nothing is left.
/// The result always satisfies `normalize(normalize(x)) == normalize(x)`.
pub fn normalize(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut pending_hyphen = false;

    for ch in text.to_lowercase().chars() {
        if ch.is_ascii_lowercase() || ch.is_ascii_digit() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            slug.push(ch);
            pending_hyphen = false;
        } else if ch == '-' || ch.is_whitespace() {
            pending_hyphen = true;
        }
        // Any other character is dropped without separating its neighbours.
    }

    if slug.is_empty() {
        UNKNOWN_SHOW.to_string()
    } else {
        slug
    }
}

/// Whether `text` is already a well-formed slug.
pub fn is_slug(text: &str) -> bool {
    !text.is_empty()
        && !text.starts_with('-')
        && !text.ends_with('-')
        && !text.contains("--")
        && text
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}
