//! AWS S3 storage implementation.
//!
//! Feeds are stored as `{bucket}/{prefix}/{file_name}` so they can be served
//! directly from the bucket (or a CDN in front of it).

use async_trait::async_trait;
use aws_sdk_s3::Client;
use aws_sdk_s3::primitives::ByteStream;

use crate::error::{AppError, Result};
use crate::models::Manifest;
use crate::storage::{FeedStorage, RSS_CONTENT_TYPE};
use crate::utils::env_or;

/// S3-based feed storage.
#[derive(Clone)]
pub struct S3Storage {
    client: Client,
    bucket: String,
    prefix: String,
}

impl S3Storage {
    /// Create a new S3 storage instance.
    pub fn new(client: Client, bucket: impl Into<String>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            prefix: prefix.into(),
        }
    }

    /// Create S3 storage from environment configuration (`S3_BUCKET`, `S3_PREFIX`).
    pub async fn from_env() -> Result<Self> {
        let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
        let client = Client::new(&config);

        let bucket = env_or("S3_BUCKET", "dropout-feeds");
        let prefix = env_or("S3_PREFIX", "feeds");

        Ok(Self::new(client, bucket, prefix))
    }

    /// Object key for a file name under the configured prefix.
    fn key(&self, file_name: &str) -> String {
        object_key(&self.prefix, file_name)
    }

    async fn put(&self, file_name: &str, body: Vec<u8>, content_type: &str) -> Result<String> {
        let key = self.key(file_name);
        let size = body.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::s3(e.into_service_error()))?;

        let location = format!("s3://{}/{}", self.bucket, key);
        log::info!("Wrote {} bytes to {}", size, location);
        Ok(location)
    }
}

/// Join a prefix and file name into an object key.
fn object_key(prefix: &str, file_name: &str) -> String {
    let prefix = prefix.trim_matches('/');
    if prefix.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", prefix, file_name)
    }
}

#[async_trait]
impl FeedStorage for S3Storage {
    async fn write_feed(&self, file_name: &str, xml: &str) -> Result<String> {
        self.put(file_name, xml.as_bytes().to_vec(), RSS_CONTENT_TYPE)
            .await
    }

    async fn write_manifest(&self, file_name: &str, manifest: &Manifest) -> Result<String> {
        let json = serde_json::to_vec_pretty(manifest)?;
        self.put(file_name, json, "application/json").await
    }

    async fn load_manifest(&self, file_name: &str) -> Result<Option<Manifest>> {
        let key = self.key(file_name);
        let result = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(&key)
            .send()
            .await;

        match result {
            Ok(output) => {
                let bytes = output.body.collect().await.map_err(AppError::s3)?;
                Ok(Some(serde_json::from_slice(&bytes.into_bytes())?))
            }
            Err(err) => {
                let service_err = err.into_service_error();
                if service_err.is_no_such_key() {
                    log::info!("No manifest at s3://{}/{}", self.bucket, key);
                    Ok(None)
                } else {
                    Err(AppError::s3(service_err))
                }
            }
        }
    }

    fn location(&self) -> String {
        format!("s3://{}/{}", self.bucket, self.prefix.trim_matches('/'))
    }
}
