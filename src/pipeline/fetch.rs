// src/pipeline/fetch.rs

//! Source feed loading.

use std::fmt;
use std::path::PathBuf;

use crate::error::{AppError, Result};
use crate::models::Config;
use crate::utils::http;

/// Where the aggregated feed comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedSource {
    /// Fetch over HTTP(S)
    Url(String),
    /// Read a local file
    File(PathBuf),
}

impl FeedSource {
    /// Source configured in `source.feed_url`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let url = config.source.feed_url.trim();
        if url.is_empty() {
            return Err(AppError::config(
                "No source feed configured (set source.feed_url or FEED_URL)",
            ));
        }
        Ok(Self::Url(url.to_string()))
    }

    /// Load the raw feed text. Fetch failures are returned to the caller; no retry.
    pub async fn load(&self, client: &reqwest::Client) -> Result<String> {
        match self {
            Self::Url(url) => {
                log::info!("Fetching source feed from {}", url);
                http::fetch_text(client, url).await
            }
            Self::File(path) => {
                log::info!("Reading source feed from {}", path.display());
                Ok(tokio::fs::read_to_string(path).await?)
            }
        }
    }
}

impl fmt::Display for FeedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}
