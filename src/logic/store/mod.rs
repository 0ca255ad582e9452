//! Artifact Store - On-disk layout for snapshots and models
//!
//! Owns the two working directories and the file naming conventions:
//!
//! ```text
//! data/voice_data_<YYYYMMDD_HHMMSS>.json
//! models/voice_emotion_model_auto_<YYYYMMDD_HHMMSS>.bin
//! models/training_report_auto_<YYYYMMDD_HHMMSS>.json
//! ```
//!
//! Stamps are second-granular. When a name is already taken a numeric
//! suffix (`_1`, `_2`, ...) is appended, so files are never overwritten.
//! All writes go through a `.tmp` sibling and a rename.


use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Timestamp format used in every generated file name
pub const STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

pub const SNAPSHOT_PREFIX: &str = "voice_data_";
pub const MODEL_PREFIX: &str = "voice_emotion_model_";
pub const REPORT_PREFIX: &str = "training_report_";
pub const VERSION_PREFIX: &str = "auto_";

pub const SNAPSHOT_EXT: &str = "json";
pub const MODEL_EXT: &str = "bin";
pub const REPORT_EXT: &str = "json";

/// Which of the two managed directories a file belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Raw export snapshots
    Data,
    /// Model artifacts and training reports
    Model,
}

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    #[error("failed to write {}: {source}", path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("failed to read {}: {source}", path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("failed to list {}: {source}", path.display())]
    List { path: PathBuf, source: io::Error },

    #[error("failed to encode artifact: {0}")]
    Encode(String),

    #[error("failed to decode artifact: {0}")]
    Decode(String),

    #[error("not a model artifact file")]
    BadMagic,

    #[error("unsupported artifact format version {0}")]
    UnsupportedFormat(u8),

    #[error("artifact file truncated")]
    Truncated,

    #[error("artifact checksum mismatch (expected {expected:08x}, got {actual:08x})")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// Paths and naming for snapshots and model artifacts
#[derive(Debug, Clone)]
pub struct ArtifactStore {
    data_dir: PathBuf,
    models_dir: PathBuf,
}

impl ArtifactStore {
    pub fn new(data_dir: impl Into<PathBuf>, models_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            models_dir: models_dir.into(),
        }
    }

    /// Create both directories if missing. Safe to call every cycle.
    pub fn ensure_dirs(&self) -> Result<(), StoreError> {
        for dir in [&self.data_dir, &self.models_dir] {
            fs::create_dir_all(dir).map_err(|source| StoreError::CreateDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(())
    }

    pub fn dir(&self, kind: ArtifactKind) -> &Path {
        match kind {
            ArtifactKind::Data => &self.data_dir,
            ArtifactKind::Model => &self.models_dir,
        }
    }

    /// Path for a logical file name inside the given category
    pub fn path_for(&self, kind: ArtifactKind, name: &str) -> PathBuf {
        self.dir(kind).join(name)
    }

    /// Fresh, not-yet-existing path for a snapshot taken at `now`
    pub fn snapshot_path(&self, now: DateTime<Local>) -> PathBuf {
        let base = now.format(STAMP_FORMAT).to_string();
        let stamp = unique_stamp(&base, |candidate| {
            self.path_for(ArtifactKind::Data, &snapshot_file_name(candidate))
                .exists()
        });
        self.path_for(ArtifactKind::Data, &snapshot_file_name(&stamp))
    }

    /// Model version for an artifact generated at `now`.
    ///
    /// Unique within this store: neither the binary artifact nor the
    /// report for the returned version exists yet.
    pub fn reserve_version(&self, now: DateTime<Local>) -> String {
        let base = format!("{}{}", VERSION_PREFIX, now.format(STAMP_FORMAT));
        unique_stamp(&base, |candidate| {
            self.model_path(candidate).exists() || self.report_path(candidate).exists()
        })
    }

    pub fn model_path(&self, version: &str) -> PathBuf {
        self.path_for(
            ArtifactKind::Model,
            &format!("{}{}.{}", MODEL_PREFIX, version, MODEL_EXT),
        )
    }

    pub fn report_path(&self, version: &str) -> PathBuf {
        self.path_for(
            ArtifactKind::Model,
            &format!("{}{}.{}", REPORT_PREFIX, version, REPORT_EXT),
        )
    }

    /// Write `bytes` to `path` via a temporary sibling and rename
    pub fn write_atomic(&self, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
        let tmp = tmp_path(path);

        let result = (|| -> io::Result<()> {
            let mut file = File::create(&tmp)?;
            file.write_all(bytes)?;
            file.sync_all()?;
            fs::rename(&tmp, path)
        })();

        if let Err(source) = result {
            let _ = fs::remove_file(&tmp);
            return Err(StoreError::Write {
                path: path.to_path_buf(),
                source,
            });
        }

        log::debug!("Wrote {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }

    pub fn read(&self, path: &Path) -> Result<Vec<u8>, StoreError> {
        fs::read(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })
    }

    /// All persisted snapshots, oldest first
    pub fn list_snapshots(&self) -> Result<Vec<PathBuf>, StoreError> {
        self.list(ArtifactKind::Data, SNAPSHOT_PREFIX, SNAPSHOT_EXT)
    }

    /// All persisted binary model artifacts, oldest first
    pub fn list_models(&self) -> Result<Vec<PathBuf>, StoreError> {
        self.list(ArtifactKind::Model, MODEL_PREFIX, MODEL_EXT)
    }

    /// Most recent binary model artifact, if any
    pub fn latest_model(&self) -> Result<Option<PathBuf>, StoreError> {
        Ok(self.list_models()?.pop())
    }

    fn list(&self, kind: ArtifactKind, prefix: &str, ext: &str) -> Result<Vec<PathBuf>, StoreError> {
        let dir = self.dir(kind);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut paths: Vec<PathBuf> = fs::read_dir(dir)
            .map_err(|source| StoreError::List {
                path: dir.to_path_buf(),
                source,
            })?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.extension().map_or(false, |e| e == ext))
            .filter(|p| {
                p.file_name()
                    .and_then(|n| n.to_str())
                    .map_or(false, |n| n.starts_with(prefix))
            })
            .collect();

        // Stamps sort chronologically
        paths.sort();
        Ok(paths)
    }
}

fn snapshot_file_name(stamp: &str) -> String {
    format!("{}{}.{}", SNAPSHOT_PREFIX, stamp, SNAPSHOT_EXT)
}

/// `base` if free, otherwise the first free `base_1`, `base_2`, ...
fn unique_stamp(base: &str, taken: impl Fn(&str) -> bool) -> String {
    if !taken(base) {
        return base.to_string();
    }

    let mut n: u32 = 1;
    loop {
        let candidate = format!("{}_{}", base, n);
        if !taken(&candidate) {
            log::debug!("Name {} already taken, using {}", base, candidate);
            return candidate;
        }
        n += 1;
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
