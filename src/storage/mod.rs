//! Storage abstractions for generated feeds.
//!
//! ## Layout
//!
//! ```text
//! {root}/
//! ├── all-shows.xml         # Aggregate feed
//! ├── dimension-20.xml      # One feed per show slug
//! ├── game-changer.xml
//! └── manifest.json         # Index of the documents above
//! ```

pub mod local;
#[cfg(feature = "s3")]
pub mod s3;

use async_trait::async_trait;

use crate::error::Result;
use crate::models::Manifest;

// Re-export for convenience
pub use local::LocalStorage;
#[cfg(feature = "s3")]
pub use s3::S3Storage;

/// Content type of generated feed documents.
pub const RSS_CONTENT_TYPE: &str = "application/rss+xml; charset=utf-8";

/// Trait for feed storage backends.
#[async_trait]
pub trait FeedStorage: Send + Sync {
    /// Write one feed document. Returns the location it was written to.
    async fn write_feed(&self, file_name: &str, xml: &str) -> Result<String>;

    /// Write the run manifest under `file_name`.
    async fn write_manifest(&self, file_name: &str, manifest: &Manifest) -> Result<String>;

    /// Load a previously written manifest, if any.
    async fn load_manifest(&self, file_name: &str) -> Result<Option<Manifest>>;

    /// Human-readable root of this backend (directory or bucket URL).
    fn location(&self) -> String;
}
