//! End-to-end split of a newsletter feed into local per-show feeds.

use std::path::Path;

use feedsplit::models::{Config, SourceConfig};
use feedsplit::pipeline::{FeedSource, run_pipeline};
use feedsplit::services::{classify, extract_episodes};
use feedsplit::storage::{FeedStorage, LocalStorage};
use feedsplit::utils::http::create_client;
use tempfile::TempDir;

const NEWSLETTER: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom">
  <title>Dropout Newsletter</title>
  <entry>
    <title>Dimension 20: Fantasy High - Episode 1</title>
    <id>urn:d20-1</id>
    <link rel="alternate" href="https://www.dropout.tv/videos/d20-1"/>
    <published>2024-01-01T12:00:00Z</published>
    <content type="html"><![CDATA[<p>The Bad Kids begin.</p>]]></content>
  </entry>
  <entry>
    <title>Game Changer - Season 6 Premiere</title>
    <id>urn:gc-1</id>
    <updated>2024-01-02T12:00:00Z</updated>
  </entry>
  <entry>
    <title>[Make Some Noise] Episode 3</title>
    <id>urn:msn-3</id>
  </entry>
  <entry>
    <title>Dimension 20: Fantasy High - Episode 2</title>
    <id>urn:d20-2</id>
  </entry>
  <entry>
    <title>Behind the scenes with dirty laundry</title>
    <id>urn:dl-bts</id>
  </entry>
</feed>"#;

async fn split_into(dir: &Path) -> (Config, LocalStorage) {
    let source_path = dir.join("newsletter.xml");
    std::fs::write(&source_path, NEWSLETTER).unwrap();

    let mut config = Config::default();
    config.output.dir = dir.join("feeds").display().to_string();

    let storage = LocalStorage::new(&config.output.dir);
    let client = create_client(&SourceConfig::default()).unwrap();
    let stats = run_pipeline(&config, &FeedSource::File(source_path), &storage, &client)
        .await
        .unwrap();

    assert_eq!(stats.episode_count, 5);
    assert_eq!(stats.show_count, 4);
    assert_eq!(stats.feeds_written, 5);

    (config, storage)
}

#[tokio::test]
async fn splits_newsletter_into_show_feeds() {
    let tmp = TempDir::new().unwrap();
    let (config, _storage) = split_into(tmp.path()).await;
    let out = Path::new(&config.output.dir);

    for name in [
        "dimension-20.xml",
        "game-changer.xml",
        "make-some-noise.xml",
        "dirty-laundry.xml",
        "all-shows.xml",
        "manifest.json",
    ] {
        assert!(out.join(name).exists(), "missing {name}");
    }

    let d20 = std::fs::read_to_string(out.join("dimension-20.xml")).unwrap();
    assert!(d20.contains("<title>Dimension 20</title>"));
    assert!(d20.contains("<link>https://www.dropout.tv/videos/d20-1</link>"));
    assert!(d20.contains("&lt;p&gt;The Bad Kids begin.&lt;/p&gt;"));
    assert_eq!(d20.matches("<item>").count(), 2);

    let all = std::fs::read_to_string(out.join("all-shows.xml")).unwrap();
    assert_eq!(all.matches("<item>").count(), 5);
}

#[tokio::test]
async fn generated_feeds_classify_back_to_their_show() {
    let tmp = TempDir::new().unwrap();
    let (config, _storage) = split_into(tmp.path()).await;
    let out = Path::new(&config.output.dir);

    for slug in ["dimension-20", "game-changer", "make-some-noise", "dirty-laundry"] {
        let xml = std::fs::read_to_string(out.join(format!("{slug}.xml"))).unwrap();
        let records = extract_episodes(&xml);
        assert!(!records.is_empty());
        for record in records {
            assert_eq!(classify(&record.title), slug, "title {:?}", record.title);
        }
    }
}

#[tokio::test]
async fn rerun_is_byte_identical() {
    let tmp = TempDir::new().unwrap();
    let (config, storage) = split_into(tmp.path()).await;
    let first = storage
        .load_manifest(&config.output.manifest_file)
        .await
        .unwrap()
        .unwrap();

    let (_, storage) = split_into(tmp.path()).await;
    let second = storage
        .load_manifest(&config.output.manifest_file)
        .await
        .unwrap()
        .unwrap();

    let digests = |m: &feedsplit::models::Manifest| {
        m.feeds
            .iter()
            .map(|f| (f.file.clone(), f.sha256.clone()))
            .collect::<Vec<_>>()
    };
    assert_eq!(digests(&first), digests(&second));
    assert_eq!(first.show_count(), 4);
}
