//! Sync Module - Cycle orchestration
//!
//! This module handles:
//! - One fetch -> extract -> summarize -> persist cycle (`cycle`)
//! - The fixed-interval loop that drives cycles until shutdown (`scheduler`)

pub mod cycle;
pub mod scheduler;


pub use cycle::{CycleOutcome, CycleReport, SetupError, SyncPipeline};
pub use scheduler::{Scheduler, SchedulerSummary};
