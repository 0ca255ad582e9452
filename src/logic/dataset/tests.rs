use super::*;
use crate::logic::test_support::{qualifying_record, snapshot_with, uniform_snapshot};
use serde_json::json;
use std::fs;
use tempfile::tempdir;

#[test]
fn test_uniform_snapshot_distribution() {
    let dataset = extract_from_value(&uniform_snapshot("happy", 12), "metadata").unwrap();

    assert_eq!(dataset.len(), 12);
    assert_eq!(dataset.total_records, 12);
    assert_eq!(dataset.distribution.len(), 1);
    assert_eq!(dataset.distribution["happy"], 12);
}

#[test]
fn test_sample_fields_are_normalized() {
    let dataset = extract_from_value(&snapshot_with(vec![qualifying_record("sad", 72.5)]), "metadata")
        .unwrap();
    let sample = &dataset.samples[0];

    assert_eq!(sample.emotion, "sad");
    assert_eq!(sample.confidence, 72.5);
    assert_eq!(sample.transcript, "I feel sad");
    assert_eq!(sample.audio_features.mfcc, vec![1.5, -2.25, 3.0]);
    assert_eq!(sample.audio_features.pitch, 220.0);
    assert_eq!(sample.audio_features.spectral_centroid, 1800.5);
    assert_eq!(sample.audio_features.zero_crossing_rate, 0.08);
    assert_eq!(sample.bert_features, Some(json!({ "label": "sad", "score": 0.9 })));
    assert_eq!(sample.user_context.ip, "10.0.0.7");
    assert_eq!(sample.user_context.session, "session-42");
}

#[test]
fn test_missing_optional_fields_default() {
    let snapshot = snapshot_with(vec![json!({
        "emotion": "angry",
        "voiceFeatures": { "pitch": 310 },
        "timestamp": 1710000000
    })]);

    let dataset = extract_from_value(&snapshot, "metadata").unwrap();
    let sample = &dataset.samples[0];

    assert_eq!(sample.confidence, 0.0);
    assert_eq!(sample.transcript, "");
    assert!(sample.audio_features.mfcc.is_empty());
    assert_eq!(sample.audio_features.pitch, 310.0);
    assert_eq!(sample.audio_features.energy, 0.0);
    assert_eq!(sample.bert_features, None);
    assert_eq!(sample.user_context.ip, "");
    assert_eq!(sample.user_context.timestamp, "1710000000");
}

#[test]
fn test_unqualified_records_are_skipped() {
    let snapshot = snapshot_with(vec![
        qualifying_record("happy", 90.0),
        json!({ "voiceFeatures": { "pitch": 1 } }),
        json!({ "emotion": "", "voiceFeatures": { "pitch": 1 } }),
        json!({ "emotion": "sad" }),
        json!({ "emotion": "sad", "voiceFeatures": {} }),
        json!({ "emotion": "sad", "voiceFeatures": null }),
        json!({ "emotion": "sad", "features": [0.1, 0.2] }),
        json!("not a record"),
        qualifying_record("calm", 0.0),
    ]);

    let dataset = extract_from_value(&snapshot, "metadata").unwrap();

    assert_eq!(dataset.total_records, 9);
    assert_eq!(dataset.len(), 2);
    let labels: Vec<&str> = dataset.distribution.keys().map(String::as_str).collect();
    assert_eq!(labels, vec!["calm", "happy"]);
    assert_eq!(dataset.distribution.values().sum::<usize>(), dataset.len());
}

#[test]
fn test_missing_records_key_is_empty() {
    let dataset = extract_from_value(&json!({ "sessions": [] }), "metadata").unwrap();
    assert!(dataset.is_empty());
    assert_eq!(dataset.total_records, 0);
}

#[test]
fn test_custom_records_key() {
    let snapshot = json!({ "uploads": [qualifying_record("fear", 60.0)] });
    let dataset = extract_from_value(&snapshot, "uploads").unwrap();
    assert_eq!(dataset.len(), 1);
}

#[test]
fn test_invalid_shapes_are_reported() {
    assert!(matches!(
        extract_from_value(&json!([1, 2, 3]), "metadata"),
        Err(ExtractError::InvalidRoot)
    ));
    assert!(matches!(
        extract_from_value(&json!({ "metadata": { "a": 1 } }), "metadata"),
        Err(ExtractError::InvalidRecords(_))
    ));
}

#[test]
fn test_labels_keep_first_seen_order() {
    let snapshot = snapshot_with(vec![
        qualifying_record("sad", 50.0),
        qualifying_record("happy", 50.0),
        qualifying_record("angry", 50.0),
        qualifying_record("happy", 50.0),
        qualifying_record("calm", 50.0),
        qualifying_record("sad", 50.0),
    ]);
    let dataset = extract_from_value(&snapshot, "metadata").unwrap();

    assert_eq!(dataset.labels, vec!["sad", "happy", "angry", "calm"]);
    assert_eq!(dataset.labels.len(), dataset.distribution.len());
    assert!(ExtractedDataset::default().labels.is_empty());
}

#[test]
fn test_best_covered_label() {
    let snapshot = snapshot_with(vec![
        qualifying_record("sad", 50.0),
        qualifying_record("happy", 50.0),
        qualifying_record("sad", 50.0),
    ]);
    let dataset = extract_from_value(&snapshot, "metadata").unwrap();
    assert_eq!(dataset.best_covered(), Some(("sad", 2)));
    assert_eq!(ExtractedDataset::default().best_covered(), None);
}

#[test]
fn test_extraction_is_repeatable() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("voice_data_20240309_140507.json");
    let snapshot = snapshot_with(vec![
        qualifying_record("happy", 91.0),
        qualifying_record("neutral", 12.0),
        json!({ "emotion": "sad" }),
    ]);
    fs::write(&path, serde_json::to_vec_pretty(&snapshot).unwrap()).unwrap();

    let first = extract_samples(&path, "metadata").unwrap();
    let second = extract_samples(&path, "metadata").unwrap();

    assert_eq!(
        serde_json::to_vec(&first.samples).unwrap(),
        serde_json::to_vec(&second.samples).unwrap()
    );
    assert_eq!(first, second);
}

#[test]
fn test_truncated_snapshot_is_a_parse_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("voice_data_20240309_140507.json");
    let truncated = br#"{"metadata": [{"emotion": "happy", "voiceFea"#;
    fs::write(&path, truncated).unwrap();

    let err = extract_samples(&path, "metadata").unwrap_err();
    assert!(matches!(err, ExtractError::Parse { .. }));

    // Snapshot is left as it was
    assert_eq!(fs::read(&path).unwrap(), truncated.to_vec());
}

#[test]
fn test_missing_file_is_a_read_error() {
    let dir = tempdir().unwrap();
    let err = extract_samples(&dir.path().join("absent.json"), "metadata").unwrap_err();
    assert!(matches!(err, ExtractError::Read { .. }));
}
