//! Output document structures.

use serde::{Deserialize, Serialize};

use super::Episode;

/// An RSS channel ready for serialization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedDocument {
    pub title: String,
    pub link: String,
    pub description: String,
    pub episodes: Vec<Episode>,
}

/// A serialized feed document and the file it is stored under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedFeed {
    /// Show slug, `None` for the aggregate feed
    pub slug: Option<String>,

    /// Channel title
    pub title: String,

    /// Target file name (e.g. `dimension-20.xml`)
    pub file_name: String,

    pub episode_count: usize,

    /// RSS 2.0 document text
    pub xml: String,
}

/// Index of the documents written by a run.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Manifest {
    pub feeds: Vec<ManifestEntry>,
}

/// One written document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ManifestEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    pub title: String,
    pub file: String,
    pub episode_count: usize,

    /// Hex SHA-256 of the document bytes
    pub sha256: String,
}

impl ManifestEntry {
    pub fn from_feed(feed: &RenderedFeed) -> Self {
        Self {
            slug: feed.slug.clone(),
            title: feed.title.clone(),
            file: feed.file_name.clone(),
            episode_count: feed.episode_count,
            sha256: crate::utils::sha256_hex(feed.xml.as_bytes()),
        }
    }
}

impl Manifest {
    pub fn from_feeds(feeds: &[RenderedFeed]) -> Self {
        Self {
            feeds: feeds.iter().map(ManifestEntry::from_feed).collect(),
        }
    }

    /// Number of per-show feeds (the aggregate is excluded).
    pub fn show_count(&self) -> usize {
        self.feeds.iter().filter(|f| f.slug.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rendered(slug: Option<&str>, file: &str) -> RenderedFeed {
        RenderedFeed {
            slug: slug.map(str::to_string),
            title: "Title".to_string(),
            file_name: file.to_string(),
            episode_count: 1,
            xml: "<rss/>".to_string(),
        }
    }

    #[test]
    fn manifest_counts_shows_only() {
        let feeds = vec![
            rendered(Some("dimension-20"), "dimension-20.xml"),
            rendered(None, "all-shows.xml"),
        ];
        let manifest = Manifest::from_feeds(&feeds);
        assert_eq!(manifest.feeds.len(), 2);
        assert_eq!(manifest.show_count(), 1);
    }

    #[test]
    fn aggregate_entry_omits_slug_in_json() {
        let entry = ManifestEntry::from_feed(&rendered(None, "all-shows.xml"));
        let json = serde_json::to_string(&entry).unwrap();
        assert!(!json.contains("slug"));
        assert_eq!(entry.sha256.len(), 64);
    }
}
