// src/models/mod.rs

//! Domain models for the feed splitter.
//!
//! This module contains all data structures used throughout the application,
//! organized by their primary purpose.

mod config;
mod episode;
mod feed;

// Re-export all public types
pub use config::{ChannelConfig, Config, LoggingConfig, OutputConfig, SourceConfig};
pub use episode::{Episode, EpisodeRecord, ShowGroup};
pub use feed::{FeedDocument, Manifest, ManifestEntry, RenderedFeed};

use chrono::{DateTime, Utc};

/// Statistics for a single pipeline run.
#[derive(Debug, Clone)]
pub struct RunStats {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub episode_count: usize,
    pub show_count: usize,
    pub feeds_written: usize,
}

impl RunStats {
    pub fn elapsed_ms(&self) -> i64 {
        (self.end_time - self.start_time).num_milliseconds()
    }
}
