//! REST client for the hosted object store.

use async_trait::async_trait;
use reqwest::Response;
use serde::Deserialize;

use edvise_core::config::BackendConfig;
use edvise_core::{AssetCategory, Error, Result};

use crate::key::object_key;

const SERVICE: &str = "object storage";

/// Upload contract the workflow layer is written against.
#[async_trait]
pub trait AssetStore: Send + Sync {
    /// Store `bytes` under a generated key and return the public URL.
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_filename: &str,
        category: AssetCategory,
    ) -> Result<String>;
}

/// Client for the storage service: uploads and a configuration probe.
#[derive(Debug, Clone)]
pub struct AssetClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    bucket: String,
}

/// One bucket as reported by the storage service.
#[derive(Debug, Deserialize)]
struct Bucket {
    name: String,
}

impl AssetClient {
    /// Create a client from backend settings.
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            bucket: config.bucket.clone(),
        }
    }

    /// Public URL for an object path in the configured bucket.
    ///
    /// Assumed stable for the object's lifetime; the store does not issue
    /// signed or expiring URLs here.
    pub fn public_url(&self, path: &str) -> String {
        format!(
            "{}/storage/v1/object/public/{}/{path}",
            self.base_url, self.bucket
        )
    }

    /// Probe the storage service by listing buckets.
    ///
    /// Returns the bucket names so a caller can report whether the expected
    /// bucket exists.
    pub async fn check_storage(&self) -> Result<Vec<String>> {
        let url = format!("{}/storage/v1/bucket", self.base_url);
        let response = self
            .http
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "Storage probe failed"))?;
        if !response.status().is_success() {
            let err = Self::failure_from(response).await;
            tracing::warn!(error = %err, "Storage probe rejected");
            return Err(err);
        }
        let buckets: Vec<Bucket> = response.json().await?;
        tracing::info!(count = buckets.len(), "Storage configured");
        Ok(buckets.into_iter().map(|b| b.name).collect())
    }

    async fn failure_from(response: Response) -> Error {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<serde_json::Value>(&body)
            .ok()
            .and_then(|v| v.get("message")?.as_str().map(str::to_string))
            .unwrap_or_else(|| {
                if body.is_empty() {
                    status.to_string()
                } else {
                    body
                }
            });
        Error::remote(SERVICE, message)
    }
}

#[async_trait]
impl AssetStore for AssetClient {
    async fn upload(
        &self,
        bytes: Vec<u8>,
        original_filename: &str,
        category: AssetCategory,
    ) -> Result<String> {
        if bytes.is_empty() {
            return Err(Error::validation("no file selected"));
        }
        let path = object_key(original_filename, category);
        let url = format!("{}/storage/v1/object/{}/{path}", self.base_url, self.bucket);
        tracing::info!(%category, path = %path, size = bytes.len(), "Uploading asset");

        let response = self
            .http
            .post(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("content-type", "application/octet-stream")
            .body(bytes)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, path = %path, "Upload failed"))?;

        if !response.status().is_success() {
            let err = Self::failure_from(response).await;
            tracing::warn!(error = %err, path = %path, "Upload rejected");
            return Err(err);
        }

        let public_url = self.public_url(&path);
        tracing::info!(url = %public_url, "Asset uploaded");
        Ok(public_url)
    }
}
