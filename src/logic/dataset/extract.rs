//! Sample extraction
//!
//! Walks the record list of a persisted snapshot and keeps every record
//! that has both an `emotion` label and a non-empty `voiceFeatures`
//! object. Everything else is skipped without comment. Optional fields
//! default independently, so a sparse record never fails extraction.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use super::record::{
    AudioFeatures, EmotionDistribution, ExtractedDataset, TrainingSample, UserContext,
};

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("failed to read snapshot {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("snapshot {} is not valid JSON: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("snapshot root is not a JSON object")]
    InvalidRoot,

    #[error("records key '{0}' does not hold an array")]
    InvalidRecords(String),
}

/// Load the snapshot at `path` and extract its training samples
pub fn extract_samples(path: &Path, records_key: &str) -> Result<ExtractedDataset, ExtractError> {
    let content = fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let snapshot: Value = serde_json::from_slice(&content).map_err(|source| ExtractError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    extract_from_value(&snapshot, records_key)
}

/// Extract training samples from an already parsed snapshot
pub fn extract_from_value(
    snapshot: &Value,
    records_key: &str,
) -> Result<ExtractedDataset, ExtractError> {
    let root = snapshot.as_object().ok_or(ExtractError::InvalidRoot)?;

    let records = match root.get(records_key) {
        None | Some(Value::Null) => return Ok(ExtractedDataset::default()),
        Some(Value::Array(records)) => records,
        Some(_) => return Err(ExtractError::InvalidRecords(records_key.to_string())),
    };

    let mut samples = Vec::new();
    let mut distribution = EmotionDistribution::new();
    let mut labels = Vec::new();

    for record in records.iter().filter_map(Value::as_object) {
        if let Some(sample) = to_sample(record) {
            let count = distribution.entry(sample.emotion.clone()).or_insert(0);
            if *count == 0 {
                labels.push(sample.emotion.clone());
            }
            *count += 1;
            samples.push(sample);
        }
    }

    log::debug!(
        "Extracted {} of {} records ({} labels)",
        samples.len(),
        records.len(),
        distribution.len()
    );

    Ok(ExtractedDataset {
        total_records: records.len(),
        samples,
        distribution,
        labels,
    })
}

/// Normalize one record, or `None` if it lacks a label or features
fn to_sample(record: &Map<String, Value>) -> Option<TrainingSample> {
    let emotion = record
        .get("emotion")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())?;

    let features = record
        .get("voiceFeatures")
        .and_then(Value::as_object)
        .filter(|f| !f.is_empty())?;

    Some(TrainingSample {
        emotion: emotion.to_string(),
        confidence: number(record, "confidence"),
        transcript: record
            .get("transcript")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        audio_features: AudioFeatures {
            mfcc: features
                .get("mfcc")
                .and_then(Value::as_array)
                .map(|values| values.iter().filter_map(Value::as_f64).collect())
                .unwrap_or_default(),
            pitch: number(features, "pitch"),
            energy: number(features, "energy"),
            spectral_centroid: number(features, "spectralCentroid"),
            zero_crossing_rate: number(features, "zcr"),
        },
        bert_features: record.get("bertAnalysis").filter(|v| !v.is_null()).cloned(),
        user_context: UserContext {
            ip: text(record, "ip"),
            timestamp: text(record, "timestamp"),
            session: text(record, "sessionId"),
        },
    })
}

fn number(map: &Map<String, Value>, key: &str) -> f64 {
    map.get(key).and_then(Value::as_f64).unwrap_or(0.0)
}

/// String field; other scalars are stringified, missing or null is empty
fn text(map: &Map<String, Value>, key: &str) -> String {
    match map.get(key) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
