// src/services/title.rs

//! Display titles for show slugs.

use super::slug::UNKNOWN_SHOW;

/// Placeholder title for the fallback slug.
pub const UNKNOWN_SHOW_TITLE: &str = "Unknown Show";

/// Render a slug as a display title: `um-actually` becomes `Um Actually`.
///
/// Not a true inverse of normalization; punctuation dropped while slugging
/// stays dropped. Numeric segments pass through unchanged.
pub fn format_title(slug: &str) -> String {
    if slug.is_empty() || slug == UNKNOWN_SHOW {
        return UNKNOWN_SHOW_TITLE.to_string();
    }

    let title = slug
        .split('-')
        .filter(|segment| !segment.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ");

    if title.is_empty() {
        UNKNOWN_SHOW_TITLE.to_string()
    } else {
        title
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
