//! Dataset Module - Training samples from export snapshots
//!
//! Turns a raw snapshot into normalized `TrainingSample`s plus the
//! per-label `EmotionDistribution`. Nothing here is persisted; samples
//! live only for the cycle that extracted them.

pub mod extract;
pub mod record;

#[cfg(test)]
mod tests;

pub use extract::{extract_from_value, extract_samples, ExtractError};
pub use record::{AudioFeatures, EmotionDistribution, ExtractedDataset, TrainingSample, UserContext};
