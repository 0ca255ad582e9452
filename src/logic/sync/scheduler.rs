//! Sync Loop
//!
//! Runs one cycle immediately, then one every `sync_interval`. The loop
//! wakes up at most every `poll_interval` to check whether a cycle is
//! due, and checks the shutdown signal at every sleep and while a cycle
//! is in flight. Cycles never overlap.

use std::any::Any;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use tokio::time::{sleep, Instant};
use uuid::Uuid;

use super::cycle::{CycleOutcome, CycleReport, SyncPipeline};

/// What the loop did before it was stopped
#[derive(Debug, Default)]
pub struct SchedulerSummary {
    pub cycles_run: u64,
    pub last_sync: Option<DateTime<Local>>,
    pub last_report: Option<CycleReport>,
}

pub struct Scheduler {
    pipeline: Arc<SyncPipeline>,
    sync_interval: Duration,
    poll_interval: Duration,
}

impl Scheduler {
    pub fn new(pipeline: SyncPipeline) -> Self {
        let sync_interval = pipeline.config().sync_interval;
        let poll_interval = pipeline.config().poll_interval;

        Self {
            pipeline: Arc::new(pipeline),
            sync_interval,
            poll_interval,
        }
    }

    /// Run until `shutdown` resolves
    pub async fn run_until<F>(&self, shutdown: F) -> SchedulerSummary
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);

        log::info!("🚀 Starting automated voice emotion sync...");
        log::info!("   Server: {}", self.pipeline.config().server_url);
        log::info!("   Interval: {}s", self.sync_interval.as_secs());

        let mut summary = SchedulerSummary::default();
        let mut next_due = Instant::now();

        loop {
            if Instant::now() >= next_due {
                let cycle_id = Uuid::new_v4();
                let started_at = Local::now();
                let pipeline = Arc::clone(&self.pipeline);
                let mut handle = tokio::spawn(async move { pipeline.run_cycle_as(cycle_id).await });

                let report = tokio::select! {
                    joined = &mut handle => match joined {
                        Ok(report) => report,
                        Err(e) => {
                            let message = if e.is_panic() {
                                panic_message(e.into_panic())
                            } else {
                                e.to_string()
                            };
                            log::error!("❌ Sync cycle {} aborted: {}", cycle_id, message);
                            CycleReport::faulted(cycle_id, started_at, message)
                        }
                    },
                    _ = &mut shutdown => {
                        handle.abort();
                        log::info!("🛑 Automation stopped by user (cycle {} cancelled)", cycle_id);
                        return summary;
                    }
                };

                log_outcome(&report.outcome);

                next_due = Instant::now() + self.sync_interval;
                summary.cycles_run += 1;
                summary.last_sync = Some(report.finished_at);
                summary.last_report = Some(report);

                let next_at = Local::now()
                    + chrono::Duration::from_std(self.sync_interval).unwrap_or(chrono::Duration::zero());
                log::info!("⏰ Next sync scheduled for: {}", next_at.format("%Y-%m-%d %H:%M:%S"));
            }

            let until_due = next_due.saturating_duration_since(Instant::now());
            tokio::select! {
                _ = sleep(self.poll_interval.min(until_due)) => {}
                _ = &mut shutdown => {
                    log::info!("🛑 Automation stopped by user");
                    return summary;
                }
            }
        }
    }
}

fn log_outcome(outcome: &CycleOutcome) {
    match outcome {
        CycleOutcome::Trained { .. } => log::info!("🎉 Automated training completed successfully!"),
        CycleOutcome::InsufficientData { .. } => log::warn!("⚠️ Training completed with warnings"),
        CycleOutcome::FetchFailed(_) => log::info!("ℹ️ No new data to process"),
        CycleOutcome::ExtractFailed(_) | CycleOutcome::PersistFailed(_) => {
            log::warn!("⚠️ Training completed with warnings")
        }
        CycleOutcome::Faulted(_) => log::warn!("⚠️ Sync cycle faulted, will retry at next interval"),
    }
}

fn panic_message(payload: Box<dyn Any + Send + 'static>) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
