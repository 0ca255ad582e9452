//! Sync configuration
//!
//! Built once at startup and handed to the pipeline and scheduler.
//! Nothing in here is mutated after construction.

use std::path::PathBuf;
use std::time::Duration;

use crate::constants;

/// Runtime configuration for the sync pipeline
#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Export server URL (without trailing slash)
    pub server_url: String,
    /// Directory for raw snapshots
    pub data_dir: PathBuf,
    /// Directory for model artifacts and reports
    pub models_dir: PathBuf,
    /// Key holding the record list inside an export
    pub records_key: String,
    /// Time between two cycles
    pub sync_interval: Duration,
    /// How often the scheduler wakes up to check for due work
    pub poll_interval: Duration,
    /// Upper bound on one export request
    pub request_timeout: Duration,
    /// Minimum qualifying samples for an artifact
    pub min_samples: usize,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            server_url: constants::DEFAULT_SERVER_URL.to_string(),
            data_dir: PathBuf::from(constants::DEFAULT_DATA_DIR),
            models_dir: PathBuf::from(constants::DEFAULT_MODELS_DIR),
            records_key: constants::DEFAULT_RECORDS_KEY.to_string(),
            sync_interval: Duration::from_secs(constants::DEFAULT_SYNC_INTERVAL),
            poll_interval: Duration::from_secs(constants::DEFAULT_POLL_INTERVAL),
            request_timeout: Duration::from_secs(constants::DEFAULT_REQUEST_TIMEOUT),
            min_samples: constants::DEFAULT_MIN_SAMPLES,
        }
    }
}

impl SyncConfig {
    /// Load configuration from environment variables, falling back to defaults
    pub fn from_env() -> Self {
        Self {
            server_url: constants::get_server_url(),
            data_dir: PathBuf::from(constants::get_data_dir()),
            models_dir: PathBuf::from(constants::get_models_dir()),
            records_key: constants::get_records_key(),
            sync_interval: Duration::from_secs(constants::get_sync_interval()),
            // A zero poll cadence would spin the loop
            poll_interval: Duration::from_secs(constants::get_poll_interval().max(1)),
            request_timeout: Duration::from_secs(constants::get_request_timeout().max(1)),
            min_samples: constants::get_min_samples(),
        }
    }

    /// Full URL of the export endpoint
    pub fn export_url(&self) -> String {
        format!(
            "{}{}",
            self.server_url.trim_end_matches('/'),
            constants::EXPORT_PATH
        )
    }
}
