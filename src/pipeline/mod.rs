//! Pipeline entry points for feed splitting.
//!
//! - `run_pipeline`: Load the source feed, split it by show and write every feed
//! - `split_feed`: The pure core of the pipeline (no I/O)
//! - `run_validate`: Check configuration

pub mod fetch;
#[allow(clippy::module_inception)]
pub mod pipeline;
pub mod split;
pub mod validate;
pub mod write;

pub use fetch::FeedSource;
pub use pipeline::run_pipeline;
pub use split::{SplitOutcome, show_file_name, split_feed};
pub use validate::run_validate;
pub use write::{WriteSummary, write_feeds};
