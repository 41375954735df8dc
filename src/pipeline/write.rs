// src/pipeline/write.rs

//! Persisting rendered feeds to a storage backend.

use futures::stream::{self, StreamExt, TryStreamExt};

use crate::error::Result;
use crate::models::{Manifest, OutputConfig, RenderedFeed};
use crate::storage::FeedStorage;

/// Result of writing one run's documents.
#[derive(Debug, Clone)]
pub struct WriteSummary {
    /// Locations of written feed documents, in feed order
    pub locations: Vec<String>,
    /// Location of the manifest, if one was written
    pub manifest_location: Option<String>,
    pub manifest: Manifest,
}

/// Write every feed, then the manifest.
///
/// Feeds are written with at most `output.max_concurrent_writes` in flight.
/// The first failure aborts the run.
pub async fn write_feeds(
    storage: &dyn FeedStorage,
    feeds: &[RenderedFeed],
    output: &OutputConfig,
) -> Result<WriteSummary> {
    let concurrency = output.max_concurrent_writes.max(1);

    let locations: Vec<String> = stream::iter(feeds)
        .map(|feed| async move {
            let location = storage.write_feed(&feed.file_name, &feed.xml).await?;
            log::debug!(
                "{} ({} episodes) -> {}",
                feed.title,
                feed.episode_count,
                location
            );
            Ok::<_, crate::error::AppError>(location)
        })
        .buffered(concurrency)
        .try_collect()
        .await?;

    let manifest = Manifest::from_feeds(feeds);
    let manifest_location = if output.write_manifest {
        Some(
            storage
                .write_manifest(&output.manifest_file, &manifest)
                .await?,
        )
    } else {
        None
    };

    Ok(WriteSummary {
        locations,
        manifest_location,
        manifest,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::LocalStorage;
    use tempfile::TempDir;

    fn feed(slug: Option<&str>, file: &str, xml: &str) -> RenderedFeed {
        RenderedFeed {
            slug: slug.map(str::to_string),
            title: file.to_string(),
            file_name: file.to_string(),
            episode_count: 1,
            xml: xml.to_string(),
        }
    }

    #[tokio::test]
    async fn test_writes_all_feeds_and_manifest() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let feeds = vec![
            feed(Some("dimension-20"), "dimension-20.xml", "<rss>d20</rss>"),
            feed(Some("game-changer"), "game-changer.xml", "<rss>gc</rss>"),
            feed(None, "all-shows.xml", "<rss>all</rss>"),
        ];

        let summary = write_feeds(&storage, &feeds, &OutputConfig::default())
            .await
            .unwrap();

        assert_eq!(summary.locations.len(), 3);
        assert!(summary.locations[0].ends_with("dimension-20.xml"));
        assert_eq!(
            std::fs::read_to_string(tmp.path().join("game-changer.xml")).unwrap(),
            "<rss>gc</rss>"
        );
        assert!(tmp.path().join("manifest.json").exists());
        assert_eq!(summary.manifest.show_count(), 2);
    }

    #[tokio::test]
    async fn test_manifest_can_be_disabled() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path());
        let output = OutputConfig {
            write_manifest: false,
            ..OutputConfig::default()
        };

        let summary = write_feeds(&storage, &[feed(None, "all-shows.xml", "<rss/>")], &output)
            .await
            .unwrap();

        assert!(summary.manifest_location.is_none());
        assert!(!tmp.path().join("manifest.json").exists());
    }
}
