//! Episode data structures.

use serde::{Deserialize, Serialize};

/// One feed item as read from the source feed, before classification.
///
/// Every optional source field has already been resolved to its default.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EpisodeRecord {
    /// Raw episode title (may be empty)
    pub title: String,

    /// Episode description or summary (may be empty)
    pub description: String,

    /// Episode URL (may be empty)
    pub link: String,

    /// Publication date exactly as the source supplied it
    pub published_at: String,

    /// Stable identifier, falling back to the link
    pub guid: String,
}

/// A classified episode.
///
/// The show slug is attached once by the classifier and is read-only afterwards.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Episode {
    pub title: String,
    pub description: String,
    pub link: String,
    pub published_at: String,
    pub guid: String,
    show_slug: String,
}

impl Episode {
    pub(crate) fn from_record(record: EpisodeRecord, show_slug: String) -> Self {
        Self {
            title: record.title,
            description: record.description,
            link: record.link,
            published_at: record.published_at,
            guid: record.guid,
            show_slug,
        }
    }

    /// Canonical slug of the show this episode belongs to.
    pub fn show_slug(&self) -> &str {
        &self.show_slug
    }
}

/// A show slug with its episodes in source feed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowGroup {
    pub slug: String,
    pub episodes: Vec<Episode>,
}

impl ShowGroup {
    pub fn new(slug: impl Into<String>) -> Self {
        Self {
            slug: slug.into(),
            episodes: Vec::new(),
        }
    }

    pub fn episode_count(&self) -> usize {
        self.episodes.len()
    }
}
