// src/services/classifier.rs

//! Show classification from episode titles.
//!
//! Titles in the newsletter feed carry the show name in one of a few loose
//! conventions (`Show: Episode`, `Show - Episode`, `[Show] Episode`,
//! `Show | Episode`). The classifier tries these in order, then falls back to a
//! table of known shows, then to the first delimiter-free segment.

use std::sync::LazyLock;

use regex::Regex;

use super::slug::{UNKNOWN_SHOW, normalize};
use crate::models::{Episode, EpisodeRecord};

/// Known show names (lowercase) and their slugs. Order matters: first match wins.
pub const KNOWN_SHOWS: &[(&str, &str)] = &[
    ("dimension 20", "dimension-20"),
    ("game changer", "game-changer"),
    ("um actually", "um-actually"),
    ("breaking news", "breaking-news"),
    ("rats rent a shop", "rats-rent-a-shop"),
    ("very important people", "very-important-people"),
    ("make some noise", "make-some-noise"),
    ("total forgiveness", "total-forgiveness"),
    ("adventuring party", "adventuring-party"),
    ("dirty laundry", "dirty-laundry"),
];

/// Leading show-name patterns, tried in order. Group 1 is the show name.
const DELIMITER_PATTERNS: [&str; 4] = [
    r"^([^:]+):",     // "Show Name: Episode"
    r"^([^-]+)-",     // "Show Name - Episode"
    r"^\[([^\]]+)\]", // "[Show Name] Episode"
    r"^([^|]+)\|",    // "Show Name | Episode"
];

/// Characters that end the show name in the last-resort split.
const FALLBACK_DELIMITERS: [char; 5] = [':', '-', '|', '[', ']'];

static DELIMITER_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    DELIMITER_PATTERNS
        .iter()
        .map(|pattern| Regex::new(pattern).expect("delimiter pattern is valid"))
        .collect()
});

/// Derive a show slug from an episode title.
///
/// Total and deterministic: always returns a non-empty slug, using
/// [`UNKNOWN_SHOW`] when nothing can be recovered. A delimiter match is final,
/// even when the title also names a different known show.
pub fn classify(title: &str) -> String {
    if let Some(name) = match_delimiter(title) {
        return normalize(name.trim());
    }

    if let Some(slug) = match_known_show(title) {
        return slug.to_string();
    }

    let first = title
        .split(FALLBACK_DELIMITERS)
        .next()
        .unwrap_or_default()
        .trim();
    if first.is_empty() {
        UNKNOWN_SHOW.to_string()
    } else {
        normalize(first)
    }
}

/// Attach a show slug to an extracted record.
pub fn classify_episode(record: EpisodeRecord) -> Episode {
    let slug = classify(&record.title);
    log::debug!("Classified {:?} as {}", record.title, slug);
    Episode::from_record(record, slug)
}

/// Show name captured by the first matching delimiter pattern.
fn match_delimiter(title: &str) -> Option<&str> {
    DELIMITER_REGEXES.iter().find_map(|re| {
        re.captures(title)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
    })
}

/// Slug of the first known show whose name appears anywhere in the title.
fn match_known_show(title: &str) -> Option<&'static str> {
    let lowered = title.to_lowercase();
    KNOWN_SHOWS
        .iter()
        .find(|(name, _)| lowered.contains(name))
        .map(|(_, slug)| *slug)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_colon_prefix() {
        assert_eq!(classify("Dimension 20: Fantasy High"), "dimension-20");
        assert_eq!(
            classify("Dimension 20: Fantasy High - Episode 1"),
            "dimension-20"
        );
    }

    #[test]
    fn test_hyphen_prefix() {
        assert_eq!(classify("Game Changer - New Episode"), "game-changer");
        assert_eq!(classify("Game Changer - Season 6 Premiere"), "game-changer");
    }

    #[test]
    fn test_bracket_prefix() {
        assert_eq!(classify("[Um, Actually] Season Finale"), "um-actually");
    }

    #[test]
    fn test_pipe_prefix() {
        assert_eq!(classify("Make Some Noise | Episode 4"), "make-some-noise");
    }

    #[test]
    fn test_colon_wins_over_hyphen() {
        assert_eq!(classify("Very Important People: Guest - Part 2"), "very-important-people");
    }

    #[test]
    fn test_hyphen_checked_before_bracket() {
        // The hyphen rule matches first even though the title opens with a bracket.
        assert_eq!(
            classify("[Um, Actually] Season Finale - Part 2"),
            "um-actually-season-finale"
        );
    }

    #[test]
    fn test_known_show_without_delimiter() {
        assert_eq!(classify("This week on Game Changer"), "game-changer");
        assert_eq!(classify("NEW DIRTY LAUNDRY tonight"), "dirty-laundry");
    }

    #[test]
    fn test_known_show_table_order() {
        // Both names appear; the earlier table entry wins.
        assert_eq!(
            classify("Breaking News meets Dimension 20 tonight"),
            "dimension-20"
        );
    }

    #[test]
    fn test_delimiter_match_is_never_corrected() {
        assert_eq!(
            classify("Special Guest: joins Game Changer"),
            "special-guest"
        );
    }

    #[test]
    fn test_plain_title_fallback() {
        assert_eq!(classify("Weekly Roundup"), "weekly-roundup");
    }

    #[test]
    fn test_unknown_show() {
        assert_eq!(classify(""), UNKNOWN_SHOW);
        assert_eq!(classify("   "), UNKNOWN_SHOW);
        assert_eq!(classify(":leading colon"), UNKNOWN_SHOW);
        assert_eq!(classify("[unclosed bracket"), UNKNOWN_SHOW);
    }

    #[test]
    fn test_delimiter_with_unsluggable_prefix() {
        assert_eq!(classify("!!!: Episode"), UNKNOWN_SHOW);
    }

    #[test]
    fn test_known_slugs_are_normalized() {
        for (name, slug) in KNOWN_SHOWS {
            assert_eq!(normalize(name), *slug);
        }
    }

    #[test]
    fn test_classify_episode_attaches_slug() {
        let record = EpisodeRecord {
            title: "Dirty Laundry: Who Lied?".to_string(),
            ..EpisodeRecord::default()
        };
        let episode = classify_episode(record);
        assert_eq!(episode.show_slug(), "dirty-laundry");
        assert_eq!(episode.title, "Dirty Laundry: Who Lied?");
    }
}
