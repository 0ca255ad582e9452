//! Binary artifact format and persistence
//!
//! ```text
//! +-------+---------+-------------+------------------------+
//! | magic | format  | crc32 (LE)  | bincode payload        |
//! | VEMA  | u8 = 1  | u32         | ModelArtifact (serde)  |
//! +-------+---------+-------------+------------------------+
//! ```

use std::path::{Path, PathBuf};

use crc32fast::Hasher;

use super::artifact::ModelArtifact;
use crate::logic::store::{ArtifactStore, StoreError};

pub const MAGIC: &[u8; 4] = b"VEMA";
/// Bump when the payload layout changes
pub const FORMAT_VERSION: u8 = 1;

const HEADER_LEN: usize = MAGIC.len() + 1 + 4;

/// Paths written for one artifact
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedArtifact {
    pub model_path: PathBuf,
    pub report_path: PathBuf,
}

pub fn encode(artifact: &ModelArtifact) -> Result<Vec<u8>, StoreError> {
    let payload = bincode::serde::encode_to_vec(artifact, bincode::config::standard())
        .map_err(|e| StoreError::Encode(e.to_string()))?;

    let mut out = Vec::with_capacity(HEADER_LEN + payload.len());
    out.extend_from_slice(MAGIC);
    out.push(FORMAT_VERSION);
    out.extend_from_slice(&checksum(&payload).to_le_bytes());
    out.extend_from_slice(&payload);
    Ok(out)
}

pub fn decode(bytes: &[u8]) -> Result<ModelArtifact, StoreError> {
    if bytes.len() < HEADER_LEN {
        return Err(StoreError::Truncated);
    }
    if &bytes[..4] != MAGIC {
        return Err(StoreError::BadMagic);
    }
    if bytes[4] != FORMAT_VERSION {
        return Err(StoreError::UnsupportedFormat(bytes[4]));
    }

    let expected = u32::from_le_bytes([bytes[5], bytes[6], bytes[7], bytes[8]]);
    let payload = &bytes[HEADER_LEN..];
    let actual = checksum(payload);
    if expected != actual {
        return Err(StoreError::ChecksumMismatch { expected, actual });
    }

    let (artifact, _): (ModelArtifact, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())
            .map_err(|e| StoreError::Decode(e.to_string()))?;
    Ok(artifact)
}

/// Persist the binary artifact and its JSON training report
pub fn save_artifact(store: &ArtifactStore, artifact: &ModelArtifact) -> Result<SavedArtifact, StoreError> {
    let model_path = store.model_path(&artifact.version);
    let report_path = store.report_path(&artifact.version);

    let report = serde_json::to_vec_pretty(artifact).map_err(|e| StoreError::Encode(e.to_string()))?;
    let binary = encode(artifact)?;

    store.write_atomic(&model_path, &binary)?;
    if let Err(e) = store.write_atomic(&report_path, &report) {
        // A binary without its report is never left behind
        if let Err(cleanup) = std::fs::remove_file(&model_path) {
            log::warn!("⚠️ Could not remove {}: {}", model_path.display(), cleanup);
        }
        return Err(e);
    }

    Ok(SavedArtifact {
        model_path,
        report_path,
    })
}

/// Load a binary artifact written by `save_artifact`
pub fn load_artifact(store: &ArtifactStore, path: &Path) -> Result<ModelArtifact, StoreError> {
    decode(&store.read(path)?)
}

fn checksum(payload: &[u8]) -> u32 {
    let mut hasher = Hasher::new();
    hasher.update(payload);
    hasher.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::dataset::extract_from_value;
    use crate::logic::model::{Trainer, TrainingOutcome};
    use crate::logic::test_support::{qualifying_record, snapshot_with};
    use chrono::Local;
    use tempfile::tempdir;

    fn sample_artifact(store: &ArtifactStore) -> ModelArtifact {
        let records = ["happy", "sad", "happy", "angry", "neutral", "happy", "sad", "calm", "fear", "happy", "sad"]
            .iter()
            .enumerate()
            .map(|(i, label)| qualifying_record(label, 70.0 + i as f64 * 2.5))
            .collect();
        let dataset = extract_from_value(&snapshot_with(records), "metadata").unwrap();
        let now = Local::now();

        match Trainer::new(10).summarize(&dataset, now, store.reserve_version(now)) {
            TrainingOutcome::Trained(artifact) => artifact,
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_saved_artifact_loads_back_equal() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"), dir.path().join("models"));
        store.ensure_dirs().unwrap();
        let artifact = sample_artifact(&store);

        let saved = save_artifact(&store, &artifact).unwrap();
        let loaded = load_artifact(&store, &saved.model_path).unwrap();
        assert_eq!(loaded, artifact);

        let report: ModelArtifact =
            serde_json::from_slice(&std::fs::read(&saved.report_path).unwrap()).unwrap();
        assert_eq!(report, artifact);

        assert_eq!(store.latest_model().unwrap(), Some(saved.model_path));
    }

    #[test]
    fn test_report_uses_plain_keys() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"), dir.path().join("models"));
        store.ensure_dirs().unwrap();
        let artifact = sample_artifact(&store);

        let saved = save_artifact(&store, &artifact).unwrap();
        let report: serde_json::Value =
            serde_json::from_slice(&std::fs::read(&saved.report_path).unwrap()).unwrap();

        for key in [
            "trained_on",
            "timestamp",
            "emotions",
            "emotion_counts",
            "training_accuracy",
            "confidence_threshold",
            "features_used",
            "model_improvements",
            "version",
        ] {
            assert!(report.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn test_failed_report_write_leaves_no_binary() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"), dir.path().join("models"));
        store.ensure_dirs().unwrap();
        let artifact = sample_artifact(&store);

        // A directory squatting on the report name makes the rename fail
        std::fs::create_dir_all(store.report_path(&artifact.version)).unwrap();

        let result = save_artifact(&store, &artifact);
        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert!(!store.model_path(&artifact.version).exists());
        assert_eq!(store.latest_model().unwrap(), None);
    }

    #[test]
    fn test_corrupted_payload_is_rejected() {
        let dir = tempdir().unwrap();
        let store = ArtifactStore::new(dir.path().join("data"), dir.path().join("models"));
        let mut bytes = encode(&sample_artifact(&store)).unwrap();

        let last = bytes.len() - 1;
        bytes[last] ^= 0xFF;
        assert!(matches!(decode(&bytes), Err(StoreError::ChecksumMismatch { .. })));
    }

    #[test]
    fn test_header_validation() {
        assert!(matches!(decode(b"VEM"), Err(StoreError::Truncated)));
        assert!(matches!(decode(b"JSON\x01\0\0\0\0"), Err(StoreError::BadMagic)));
        assert!(matches!(
            decode(b"VEMA\x09\0\0\0\0"),
            Err(StoreError::UnsupportedFormat(9))
        ));
    }
}
