//! Best-effort retrieval of raw order and product files from S3-compatible
//! object storage into the pipeline's input directory layout.

use std::fmt;
use std::path::Path;

use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_credential_types::provider::SharedCredentialsProvider;
use aws_credential_types::Credentials;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::Client;
use bytes::Bytes;
use thiserror::Error;
use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct S3Config {
    pub bucket: String,
    pub region: String,
    pub endpoint: Option<String>,
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
    pub force_path_style: bool,
}

impl Default for S3Config {
    fn default() -> Self {
        Self {
            bucket: "orderlens-raw".to_string(),
            region: "us-east-1".to_string(),
            endpoint: None,
            access_key_id: None,
            secret_access_key: None,
            force_path_style: false,
        }
    }
}

impl S3Config {
    /// Reads the bucket configuration from `ORDERLENS_*` and standard AWS
    /// environment variables.
    pub fn from_env() -> Result<Self, BucketError> {
        let bucket = std::env::var("ORDERLENS_BUCKET").map_err(|_| {
            BucketError::Configuration("ORDERLENS_BUCKET must be set".to_string())
        })?;
        Ok(Self {
            bucket,
            region: std::env::var("ORDERLENS_REGION").unwrap_or_else(|_| "us-east-1".to_string()),
            endpoint: std::env::var("ORDERLENS_ENDPOINT").ok(),
            access_key_id: std::env::var("AWS_ACCESS_KEY_ID").ok(),
            secret_access_key: std::env::var("AWS_SECRET_ACCESS_KEY").ok(),
            force_path_style: std::env::var("ORDERLENS_FORCE_PATH_STYLE").is_ok(),
        })
    }
}

#[derive(Debug, Error)]
pub enum BucketError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("sdk error: {0}")]
    Sdk(String),
    #[error("object not found: {0}")]
    NotFound(String),
}

impl BucketError {
    fn from_sdk(err: impl fmt::Display) -> Self {
        Self::Sdk(err.to_string())
    }
}

/// Read-only view of the remote bucket; the pipeline never writes back.
#[async_trait]
pub trait BucketStore: Send + Sync {
    async fn list_keys(&self) -> Result<Vec<String>, BucketError>;
    async fn get_object(&self, key: &str) -> Result<Bytes, BucketError>;
}

/// Outcome of one sync pass. Per-object failures are counted, not fatal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub failed: usize,
}

/// Downloads every object in the bucket to `dest/<key>`, creating parent
/// directories as needed. A failed download or write is logged and the rest
/// of the batch proceeds; only a failed listing aborts the sync.
pub async fn sync_to_dir(store: &dyn BucketStore, dest: &Path) -> Result<SyncReport, BucketError> {
    let keys = store.list_keys().await?;
    let mut report = SyncReport::default();

    for key in keys {
        let bytes = match store.get_object(&key).await {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(key = %key, error = %err, "failed to fetch object");
                report.failed += 1;
                continue;
            }
        };

        let target = dest.join(&key);
        match write_object(&target, &bytes) {
            Ok(()) => {
                info!(key = %key, path = %target.display(), "fetched object");
                report.fetched += 1;
            }
            Err(err) => {
                warn!(key = %key, error = %err, "failed to write fetched object");
                report.failed += 1;
            }
        }
    }

    Ok(report)
}

fn write_object(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes)
}

#[derive(Clone)]
pub struct S3BucketStore {
    client: Client,
    bucket: String,
}

impl S3BucketStore {
    pub async fn new(config: S3Config) -> Result<Self, BucketError> {
        if config.bucket.is_empty() {
            return Err(BucketError::Configuration(
                "bucket name cannot be empty".into(),
            ));
        }

        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()));

        if let (Some(access_key), Some(secret_key)) =
            (&config.access_key_id, &config.secret_access_key)
        {
            let credentials = Credentials::new(access_key, secret_key, None, None, "static");
            loader = loader.credentials_provider(SharedCredentialsProvider::new(credentials));
        }

        let shared_config = loader.load().await;
        let mut builder = aws_sdk_s3::config::Builder::from(&shared_config);

        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        if config.force_path_style {
            builder = builder.force_path_style(true);
        }

        let client = Client::from_conf(builder.build());
        Ok(Self {
            client,
            bucket: config.bucket,
        })
    }
}

#[async_trait]
impl BucketStore for S3BucketStore {
    async fn list_keys(&self) -> Result<Vec<String>, BucketError> {
        let mut keys = Vec::new();
        let mut pages = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .into_paginator()
            .send();

        while let Some(page) = pages.next().await {
            let page = page.map_err(BucketError::from_sdk)?;
            for object in page.contents() {
                if let Some(key) = object.key() {
                    keys.push(key.to_string());
                }
            }
        }

        Ok(keys)
    }

    async fn get_object(&self, key: &str) -> Result<Bytes, BucketError> {
        let output = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|err| match err {
                SdkError::ServiceError(service_err) => {
                    let message = service_err.err().to_string();
                    if message.contains("NoSuchKey") {
                        BucketError::NotFound(key.to_string())
                    } else {
                        BucketError::from_sdk(message)
                    }
                }
                other => BucketError::from_sdk(other),
            })?;

        let data = output.body.collect().await.map_err(BucketError::from_sdk)?;
        Ok(Bytes::from(data.into_bytes()))
    }
}
