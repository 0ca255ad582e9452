//! Trainer - Aggregate statistics over extracted samples
//!
//! There is no model fitting here. The trainer counts samples, averages
//! confidence and assembles a `ModelArtifact`. The accuracy figure is a
//! placeholder that grows with data volume.

use chrono::{DateTime, Local, SecondsFormat};

use super::artifact::{ModelArtifact, FEATURES_USED, MODEL_IMPROVEMENTS};
use crate::logic::dataset::{ExtractedDataset, TrainingSample};

/// Upper bound of the simulated accuracy
pub const ACCURACY_CAP: u32 = 95;
/// Simulated accuracy with zero samples
pub const ACCURACY_BASE: u32 = 70;
/// Simulated accuracy gained per sample
pub const ACCURACY_PER_SAMPLE: u32 = 2;
/// Lowest confidence threshold an artifact can carry
pub const CONFIDENCE_FLOOR: f64 = 80.0;

/// Result of a summarize call
#[derive(Debug, Clone, PartialEq)]
pub enum TrainingOutcome {
    Trained(ModelArtifact),
    /// Not an error: the cycle just has nothing to persist yet
    InsufficientData { found: usize, required: usize },
}

#[derive(Debug, Clone)]
pub struct Trainer {
    min_samples: usize,
}

impl Trainer {
    pub fn new(min_samples: usize) -> Self {
        Self { min_samples }
    }

    pub fn min_samples(&self) -> usize {
        self.min_samples
    }

    /// Summarize `dataset` into an artifact tagged with `version`
    pub fn summarize(
        &self,
        dataset: &ExtractedDataset,
        generated_at: DateTime<Local>,
        version: String,
    ) -> TrainingOutcome {
        let count = dataset.len();
        if count < self.min_samples {
            return TrainingOutcome::InsufficientData {
                found: count,
                required: self.min_samples,
            };
        }

        log::info!("📚 Training with {} samples...", count);
        log::info!("🎭 Emotion distribution: {:?}", dataset.distribution);

        let avg_confidence = mean_confidence(&dataset.samples);
        log::info!("📊 Average confidence in training data: {:.1}%", avg_confidence);

        TrainingOutcome::Trained(ModelArtifact {
            trained_on: count,
            timestamp: generated_at.to_rfc3339_opts(SecondsFormat::Micros, false),
            emotions: dataset.labels.clone(),
            emotion_counts: dataset.distribution.clone(),
            training_accuracy: simulated_accuracy(count),
            confidence_threshold: CONFIDENCE_FLOOR.max(avg_confidence),
            features_used: FEATURES_USED.iter().map(|s| s.to_string()).collect(),
            model_improvements: MODEL_IMPROVEMENTS
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            version,
        })
    }
}

/// Mean confidence over samples with a positive confidence, 0 if none.
/// Kept as a running mean so huge values cannot overflow to infinity.
pub fn mean_confidence(samples: &[TrainingSample]) -> f64 {
    samples
        .iter()
        .map(|s| s.confidence)
        .filter(|c| *c > 0.0 && c.is_finite())
        .zip(1u32..)
        .fold(0.0, |mean, (c, n)| mean + (c - mean) / f64::from(n))
}

/// `min(cap, base + per_sample * count)`, saturating for huge counts
pub fn simulated_accuracy(sample_count: usize) -> u32 {
    let count = u32::try_from(sample_count).unwrap_or(u32::MAX);
    ACCURACY_BASE
        .saturating_add(ACCURACY_PER_SAMPLE.saturating_mul(count))
        .min(ACCURACY_CAP)
}
