//! Export API Client
//!
//! HTTP client for the remote data export endpoint.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use reqwest::StatusCode;
use serde_json::Value;
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::logic::config::SyncConfig;
use crate::logic::store::{ArtifactStore, StoreError};

/// Export client errors
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to build HTTP client: {0}")]
    Client(reqwest::Error),

    #[error("network error: {0}")]
    Network(reqwest::Error),

    #[error("server returned HTTP {0}")]
    Status(u16),

    #[error("response is not valid JSON: {0}")]
    Parse(serde_json::Error),

    #[error("failed to serialize snapshot: {0}")]
    Encode(serde_json::Error),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// A snapshot persisted by the fetcher
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedSnapshot {
    pub path: PathBuf,
    /// Entries under the records key (0 if missing)
    pub record_count: usize,
    /// SHA-256 of the bytes written, hex encoded
    pub sha256: String,
}

/// Export API client
pub struct ExportClient {
    endpoint: String,
    records_key: String,
    http_client: reqwest::Client,
}

impl ExportClient {
    /// Create new export client with a bounded request timeout
    pub fn new(config: &SyncConfig) -> Result<Self, FetchError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(FetchError::Client)?;

        Ok(Self {
            endpoint: config.export_url(),
            records_key: config.records_key.clone(),
            http_client,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// GET the export and parse it. Only HTTP 200 counts as success.
    pub async fn fetch_export(&self) -> Result<Value, FetchError> {
        let response = self
            .http_client
            .get(&self.endpoint)
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(FetchError::Network)?;
        serde_json::from_slice(&body).map_err(FetchError::Parse)
    }

    /// Download the export and persist it as a timestamped, pretty-printed snapshot
    pub async fn fetch_snapshot(
        &self,
        store: &ArtifactStore,
        now: DateTime<Local>,
    ) -> Result<FetchedSnapshot, FetchError> {
        log::info!("📥 Downloading latest data from {}", self.endpoint);

        let export = self.fetch_export().await?;
        let bytes = serde_json::to_vec_pretty(&export).map_err(FetchError::Encode)?;

        let path = store.snapshot_path(now);
        store.write_atomic(&path, &bytes)?;

        let record_count = export
            .get(&self.records_key)
            .and_then(Value::as_array)
            .map_or(0, Vec::len);

        log::info!("✅ Data saved to: {}", path.display());
        log::info!("📊 Total recordings: {}", record_count);

        Ok(FetchedSnapshot {
            path,
            record_count,
            sha256: hex::encode(Sha256::digest(&bytes)),
        })
    }
}
