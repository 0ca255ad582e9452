//! Voice Emotion Sync
//!
//! Background job that keeps a local model directory loosely in sync with
//! a growing remote voice-emotion dataset:
//!
//! ```text
//! ┌──────────────┐   GET /api/data/export   ┌──────────────────────┐
//! │  Scheduler   │ ───────────────────────▶ │  export server       │
//! │  (interval)  │                          └──────────────────────┘
//! └──────┬───────┘
//!        ▼
//!   fetch ─▶ data/voice_data_<stamp>.json
//!        ▼
//!   extract ─▶ TrainingSamples + EmotionDistribution
//!        ▼
//!   summarize ─▶ models/voice_emotion_model_<version>.bin
//!                models/training_report_<version>.json
//! ```

pub mod constants;
pub mod logic;

pub use logic::config::SyncConfig;
pub use logic::sync::{CycleOutcome, CycleReport, Scheduler, SchedulerSummary, SyncPipeline};
