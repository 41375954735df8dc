//! Local filesystem storage implementation.
//!
//! Every document is written atomically (temp file, then rename) so a
//! reader polling the directory never sees a half-written feed.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;

use crate::error::{AppError, Result};
use crate::models::Manifest;
use crate::storage::FeedStorage;

/// Local filesystem storage backend.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root_dir: PathBuf,
}

impl LocalStorage {
    /// Create a new LocalStorage rooted at the given directory.
    pub fn new(root_dir: impl Into<PathBuf>) -> Self {
        Self {
            root_dir: root_dir.into(),
        }
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// Get the full path for a relative key.
    fn path(&self, key: &str) -> PathBuf {
        self.root_dir.join(key)
    }

    /// Ensure parent directory exists.
    async fn ensure_dir(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Write bytes atomically (write to temp, then rename).
    async fn write_bytes(&self, key: &str, bytes: &[u8]) -> Result<PathBuf> {
        let path = self.path(key);
        self.ensure_dir(&path).await?;

        let mut tmp = path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);
        let mut file = tokio::fs::File::create(&tmp).await?;
        file.write_all(bytes).await?;
        file.flush().await?;
        drop(file);

        tokio::fs::rename(&tmp, &path).await?;
        Ok(path)
    }

    /// Read bytes, returning None if file doesn't exist.
    async fn read_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path(key);
        match tokio::fs::read(&path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(AppError::Io(e)),
        }
    }
}

#[async_trait]
impl FeedStorage for LocalStorage {
    async fn write_feed(&self, file_name: &str, xml: &str) -> Result<String> {
        let path = self.write_bytes(file_name, xml.as_bytes()).await?;
        log::debug!("Wrote {} bytes to {}", xml.len(), path.display());
        Ok(path.display().to_string())
    }

    async fn write_manifest(&self, file_name: &str, manifest: &Manifest) -> Result<String> {
        let mut bytes = serde_json::to_vec_pretty(manifest)?;
        bytes.push(b'\n');
        let path = self.write_bytes(file_name, &bytes).await?;
        Ok(path.display().to_string())
    }

    async fn load_manifest(&self, file_name: &str) -> Result<Option<Manifest>> {
        match self.read_bytes(file_name).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => {
                log::warn!("No manifest found at {}", self.path(file_name).display());
                Ok(None)
            }
        }
    }

    fn location(&self) -> String {
        self.root_dir.display().to_string()
    }
}
