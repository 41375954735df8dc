//! Service layer for the feed splitter.
//!
//! This module contains the business logic for:
//! - Episode extraction from raw feed text (`extract_episodes`)
//! - Show classification from titles (`classify`)
//! - Slug normalization (`normalize`) and display titles (`format_title`)
//! - Grouping episodes by show (`group_by_show`)
//! - RSS generation (`FeedGenerator`)

pub mod classifier;
pub mod extractor;
pub mod generator;
pub mod grouping;
pub mod slug;
pub mod title;

pub use classifier::{KNOWN_SHOWS, classify, classify_episode};
pub use extractor::extract_episodes;
pub use generator::{FeedGenerator, generate_all_shows_feed, generate_show_feed, render};
pub use grouping::group_by_show;
pub use slug::{UNKNOWN_SHOW, normalize};
pub use title::format_title;
