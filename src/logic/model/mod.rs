//! Model Module - Artifact summarization and persistence
//!
//! `trainer` turns extracted samples into a `ModelArtifact`,
//! `codec` writes it as a checksummed binary plus a JSON report.

pub mod artifact;
pub mod codec;
pub mod trainer;

// Re-export common types
pub use artifact::{DatasetQuality, ModelArtifact};
pub use codec::{load_artifact, save_artifact, SavedArtifact};
pub use trainer::{Trainer, TrainingOutcome};
