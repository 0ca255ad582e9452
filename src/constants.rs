//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every value can be overridden through a `VOICE_SYNC_*` environment
//! variable (or a `.env` file in the working directory).

/// Default export server URL
pub const DEFAULT_SERVER_URL: &str = "https://nlp-emotion-detection-project.onrender.com";

/// Path of the export endpoint, appended to the server URL
pub const EXPORT_PATH: &str = "/api/data/export";

/// Directory for raw snapshots (relative to the working directory)
pub const DEFAULT_DATA_DIR: &str = "data";

/// Directory for model artifacts and training reports
pub const DEFAULT_MODELS_DIR: &str = "models";

/// Key holding the record list inside an export
pub const DEFAULT_RECORDS_KEY: &str = "metadata";

/// Default sync interval (seconds) - every 2 hours
pub const DEFAULT_SYNC_INTERVAL: u64 = 2 * 60 * 60;

/// How often the scheduler wakes up to check for due work (seconds)
pub const DEFAULT_POLL_INTERVAL: u64 = 60;

/// HTTP request timeout (seconds)
pub const DEFAULT_REQUEST_TIMEOUT: u64 = 30;

/// Minimum number of qualifying samples before an artifact is produced
pub const DEFAULT_MIN_SAMPLES: usize = 10;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Voice Emotion Sync";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get export server URL from environment or use default
pub fn get_server_url() -> String {
    std::env::var("VOICE_SYNC_SERVER_URL")
        .map(|s| s.trim_end_matches('/').to_string())
        .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string())
}

/// Get snapshot directory from environment or use default
pub fn get_data_dir() -> String {
    std::env::var("VOICE_SYNC_DATA_DIR").unwrap_or_else(|_| DEFAULT_DATA_DIR.to_string())
}

/// Get model directory from environment or use default
pub fn get_models_dir() -> String {
    std::env::var("VOICE_SYNC_MODELS_DIR").unwrap_or_else(|_| DEFAULT_MODELS_DIR.to_string())
}

/// Get the records key from environment or use default
pub fn get_records_key() -> String {
    std::env::var("VOICE_SYNC_RECORDS_KEY").unwrap_or_else(|_| DEFAULT_RECORDS_KEY.to_string())
}

/// Get sync interval from environment or use default
pub fn get_sync_interval() -> u64 {
    parse_env("VOICE_SYNC_INTERVAL_SECS").unwrap_or(DEFAULT_SYNC_INTERVAL)
}

/// Get poll cadence from environment or use default
pub fn get_poll_interval() -> u64 {
    parse_env("VOICE_SYNC_POLL_SECS").unwrap_or(DEFAULT_POLL_INTERVAL)
}

/// Get HTTP timeout from environment or use default
pub fn get_request_timeout() -> u64 {
    parse_env("VOICE_SYNC_TIMEOUT_SECS").unwrap_or(DEFAULT_REQUEST_TIMEOUT)
}

/// Get minimum sample count from environment or use default
pub fn get_min_samples() -> usize {
    parse_env("VOICE_SYNC_MIN_SAMPLES").unwrap_or(DEFAULT_MIN_SAMPLES)
}

fn parse_env<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.trim().parse().ok())
}
