use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Occurrences per emotion label among accepted samples.
/// Ordered by label so logs and reports are stable.
pub type EmotionDistribution = BTreeMap<String, usize>;

/// One snapshot record accepted for training
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TrainingSample {
    pub emotion: String,
    /// 0 when the record carries no numeric confidence
    pub confidence: f64,
    pub transcript: String,

    // ✅ Acoustic features (from `voiceFeatures`)
    pub audio_features: AudioFeatures,

    // ✅ Secondary text analysis (from `bertAnalysis`), kept verbatim
    pub bert_features: Option<Value>,

    pub user_context: UserContext,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AudioFeatures {
    pub mfcc: Vec<f64>,
    pub pitch: f64,
    pub energy: f64,
    pub spectral_centroid: f64,
    pub zero_crossing_rate: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserContext {
    pub ip: String,
    pub timestamp: String,
    pub session: String,
}

/// Result of one extraction pass over a snapshot
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtractedDataset {
    /// Records found under the records key, qualifying or not
    pub total_records: usize,
    pub samples: Vec<TrainingSample>,
    pub distribution: EmotionDistribution,
    /// Distinct labels in the order they first appear in the snapshot
    pub labels: Vec<String>,
}

impl ExtractedDataset {
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Label with the most samples (ties resolve to the first label in order)
    pub fn best_covered(&self) -> Option<(&str, usize)> {
        self.distribution
            .iter()
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(label, &count)| (label.as_str(), count))
    }
}
