// src/lambda/mod.rs

//! AWS Lambda handler for the feed splitter.
//!
//! Each invocation:
//! 1. Fetches the aggregated feed (URL from the request or `FEED_URL`)
//! 2. Splits it into per-show feeds plus the aggregate
//! 3. Writes every document and the manifest to S3

use lambda_runtime::{Error as LambdaError, LambdaEvent};
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::error::Result;
use crate::models::Config;
use crate::pipeline::{FeedSource, run_pipeline};
use crate::storage::S3Storage;
use crate::utils::http;

/// Lambda invocation payload.
#[derive(Debug, Default, Deserialize)]
pub struct SplitRequest {
    /// Override the configured source feed URL
    #[serde(default)]
    pub feed_url: Option<String>,
}

/// Lambda response payload.
#[derive(Debug, Default, Serialize)]
pub struct SplitResponse {
    pub success: bool,
    pub episode_count: usize,
    pub show_count: usize,
    pub feeds_written: usize,

    /// Error message if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Execution time in milliseconds
    pub execution_time_ms: u64,
}

/// Main Lambda handler function.
#[instrument(skip(event))]
pub async fn handler(
    event: LambdaEvent<SplitRequest>,
) -> std::result::Result<SplitResponse, LambdaError> {
    let start = std::time::Instant::now();
    let (request, _context) = event.into_parts();

    info!("Starting split: feed_url override={:?}", request.feed_url);

    match run_split(&request).await {
        Ok(mut response) => {
            response.execution_time_ms = start.elapsed().as_millis() as u64;
            info!(
                "Split completed: {} episodes, {} shows in {}ms",
                response.episode_count, response.show_count, response.execution_time_ms
            );
            Ok(response)
        }
        Err(e) => {
            error!("Split failed: {}", e);
            Ok(SplitResponse {
                success: false,
                error: Some(e.to_string()),
                execution_time_ms: start.elapsed().as_millis() as u64,
                ..Default::default()
            })
        }
    }
}

/// Internal split logic.
async fn run_split(request: &SplitRequest) -> Result<SplitResponse> {
    let config = load_lambda_config(request)?;
    let source = FeedSource::from_config(&config)?;
    let storage = S3Storage::from_env().await?;
    let client = http::create_client(&config.source)?;

    let stats = run_pipeline(&config, &source, &storage, &client).await?;

    Ok(SplitResponse {
        success: true,
        episode_count: stats.episode_count,
        show_count: stats.show_count,
        feeds_written: stats.feeds_written,
        error: None,
        execution_time_ms: 0,
    })
}

/// Configuration for the Lambda environment: defaults, then env, then request.
fn load_lambda_config(request: &SplitRequest) -> Result<Config> {
    let mut config = Config::default();
    config.apply_env();

    if let Some(url) = request.feed_url.as_deref().filter(|u| !u.trim().is_empty()) {
        config.source.feed_url = url.trim().to_string();
    }

    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_request_defaults() {
        let req: SplitRequest = serde_json::from_str("{}").unwrap();
        assert!(req.feed_url.is_none());
    }

    #[test]
    fn test_request_overrides_feed_url() {
        let req = SplitRequest {
            feed_url: Some("https://kill-the-newsletter.com/feeds/abc.xml".to_string()),
        };
        let config = load_lambda_config(&req).unwrap();
        assert_eq!(
            config.source.feed_url,
            "https://kill-the-newsletter.com/feeds/abc.xml"
        );
    }

    #[test]
    fn test_request_with_invalid_url_is_rejected() {
        let req = SplitRequest {
            feed_url: Some("not a url".to_string()),
        };
        assert!(load_lambda_config(&req).is_err());
    }

    #[test]
    fn test_error_response_shape() {
        let response = SplitResponse {
            error: Some("boom".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["success"], false);
        assert_eq!(json["error"], "boom");
    }
}
