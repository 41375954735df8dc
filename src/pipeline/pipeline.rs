// src/pipeline/pipeline.rs

use chrono::Utc;

use crate::error::Result;
use crate::models::{Config, RunStats};
use crate::services::FeedGenerator;
use crate::storage::FeedStorage;

use super::fetch::FeedSource;
use super::split::split_feed;
use super::write::write_feeds;

/// Run the full pipeline: load → split → write.
pub async fn run_pipeline(
    config: &Config,
    source: &FeedSource,
    storage: &dyn FeedStorage,
    client: &reqwest::Client,
) -> Result<RunStats> {
    let start_time = Utc::now();

    log::info!("Step 1/3: Loading source feed from {}", source);
    let raw = source.load(client).await?;
    log::info!("Loaded {} bytes", raw.len());

    log::info!("Step 2/3: Splitting episodes by show");
    let generator = FeedGenerator::new(config.channel.clone());
    let outcome = split_feed(&raw, &generator, &config.output)?;
    if outcome.episodes.is_empty() {
        log::warn!("Source feed contained no episodes; writing an empty aggregate feed");
    }
    for group in &outcome.groups {
        log::info!("  {} ({} episodes)", group.slug, group.episode_count());
    }

    log::info!("Step 3/3: Writing feeds to {}", storage.location());
    let summary = write_feeds(storage, &outcome.feeds, &config.output).await?;
    if let Some(location) = &summary.manifest_location {
        log::info!("Manifest written to {}", location);
    }

    let stats = RunStats {
        start_time,
        end_time: Utc::now(),
        episode_count: outcome.episodes.len(),
        show_count: outcome.show_count(),
        feeds_written: summary.locations.len(),
    };

    log::info!(
        "Pipeline complete: {} episodes, {} shows, {} feeds in {}ms",
        stats.episode_count,
        stats.show_count,
        stats.feeds_written,
        stats.elapsed_ms()
    );

    Ok(stats)
}
