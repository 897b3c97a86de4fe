//! Cloud media host client
//!
//! Uploads a local file into a destination folder on the media host and
//! returns the durable URL. The trait seam keeps the migration engine
//! testable without network access.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::debug;

use crate::types::{DirectoryError, Result};

/// A host that turns local files into durable URLs
#[async_trait]
pub trait MediaHost: Send + Sync {
    /// Upload `local_path` into `folder`, returning the hosted URL.
    /// May fail transiently; callers decide whether to retry.
    async fn upload(&self, local_path: &Path, folder: &str) -> Result<String>;
}

/// Configuration for the HTTP media host client
#[derive(Debug, Clone)]
pub struct CloudMediaConfig {
    /// Upload endpoint
    pub upload_url: String,
    /// Optional bearer key
    pub api_key: Option<String>,
    /// Per-upload timeout in milliseconds
    pub timeout_ms: u64,
}

/// HTTP client for the cloud media host
pub struct CloudMediaClient {
    config: CloudMediaConfig,
    http_client: reqwest::Client,
}

/// Relevant part of the host's upload response
#[derive(Debug, Deserialize)]
struct UploadResponse {
    secure_url: String,
}

impl CloudMediaClient {
    pub fn new(config: CloudMediaConfig) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| DirectoryError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
        })
    }
}

#[async_trait]
impl MediaHost for CloudMediaClient {
    async fn upload(&self, local_path: &Path, folder: &str) -> Result<String> {
        let bytes = tokio::fs::read(local_path)
            .await
            .map_err(|e| DirectoryError::Upload(format!("Failed to read {}: {}", local_path.display(), e)))?;

        let file_name = local_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload.bin".to_string());

        debug!(
            file = %local_path.display(),
            folder = %folder,
            bytes = bytes.len(),
            "Uploading file to media host"
        );

        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
        let form = reqwest::multipart::Form::new()
            .text("folder", folder.to_string())
            .part("file", part);

        let mut request = self
            .http_client
            .post(&self.config.upload_url)
            .multipart(form);
        if let Some(ref key) = self.config.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            return Err(DirectoryError::Upload(format!(
                "Media host returned {}",
                response.status()
            )));
        }

        let body: UploadResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Upload(format!("Invalid upload response: {}", e)))?;

        Ok(body.secure_url)
    }
}
