//! Model artifact produced at the end of a successful cycle.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Feature categories recorded as "used" in every artifact
pub const FEATURES_USED: &[&str] = &["mfcc", "pitch", "energy", "bert_analysis", "spectral_features"];

/// Descriptive improvement notes recorded in every artifact
pub const MODEL_IMPROVEMENTS: &[(&str, &str)] = &[
    ("audio_processing", "Enhanced MFCC + spectral features"),
    ("text_analysis", "BERT-based emotion understanding"),
    ("context_aware", "User session and temporal context"),
    ("confidence_calibration", "Adaptive confidence scoring"),
];

/// Versioned summary of one training cycle.
///
/// Written twice per cycle: a binary form for loading back and a JSON
/// training report for operators. Never mutated after construction.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    /// Number of samples the artifact summarizes
    pub trained_on: usize,
    /// Generation time, ISO 8601 local time
    pub timestamp: String,
    /// Distinct labels covered, in the order first seen in the snapshot
    pub emotions: Vec<String>,
    pub emotion_counts: BTreeMap<String, usize>,
    /// Simulated score, not a measured accuracy.
    ///
    /// No model is fitted or evaluated; this grows with the sample count
    /// and is capped (see `trainer::simulated_accuracy`).
    pub training_accuracy: u32,
    /// `max(floor, mean observed confidence)`
    pub confidence_threshold: f64,
    pub features_used: Vec<String>,
    pub model_improvements: BTreeMap<String, String>,
    /// `auto_<YYYYMMDD_HHMMSS>`, suffixed on same-second collisions
    pub version: String,
}

/// Coarse dataset size tier, reported alongside each artifact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatasetQuality {
    Excellent,
    Good,
    Improving,
}

impl DatasetQuality {
    pub fn from_sample_count(count: usize) -> Self {
        if count >= 50 {
            Self::Excellent
        } else if count >= 25 {
            Self::Good
        } else {
            Self::Improving
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Excellent => "EXCELLENT",
            Self::Good => "GOOD",
            Self::Improving => "IMPROVING",
        }
    }

    /// Operator-facing expectation line
    pub fn expectation(&self) -> &'static str {
        match self {
            Self::Excellent => "High-quality training dataset! Expect 90-95% accuracy",
            Self::Good => "Solid training dataset! Expect 85-90% accuracy",
            Self::Improving => "Growing dataset! Current estimated accuracy: 75-85%",
        }
    }
}

impl std::fmt::Display for DatasetQuality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
