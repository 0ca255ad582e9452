//! One sync cycle: fetch -> extract -> summarize -> persist.
//!
//! Every stage returns a typed result; the first failure ends the cycle
//! and is recorded in the returned `CycleReport`. Nothing here panics
//! on bad input, and nothing is kept between cycles.

use std::path::PathBuf;

use chrono::{DateTime, Local};
use thiserror::Error;
use uuid::Uuid;

use crate::logic::config::SyncConfig;
use crate::logic::dataset::{extract_samples, ExtractError};
use crate::logic::fetcher::{ExportClient, FetchError, FetchedSnapshot};
use crate::logic::model::{save_artifact, DatasetQuality, ModelArtifact, Trainer, TrainingOutcome};
use crate::logic::store::{ArtifactStore, StoreError};

/// Errors that prevent the pipeline from starting at all
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("cannot prepare working directories: {0}")]
    Store(#[from] StoreError),

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// How a cycle ended
#[derive(Debug)]
pub enum CycleOutcome {
    /// Artifact built and both files written
    Trained {
        artifact: ModelArtifact,
        model_path: PathBuf,
        report_path: PathBuf,
        quality: DatasetQuality,
    },
    /// Too few qualifying samples; nothing persisted
    InsufficientData { found: usize, required: usize },
    FetchFailed(FetchError),
    ExtractFailed(ExtractError),
    PersistFailed(StoreError),
    /// The cycle task panicked; carries the panic message
    Faulted(String),
}

impl CycleOutcome {
    pub fn is_trained(&self) -> bool {
        matches!(self, Self::Trained { .. })
    }

    pub fn is_failure(&self) -> bool {
        !matches!(self, Self::Trained { .. } | Self::InsufficientData { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Trained { .. } => "trained",
            Self::InsufficientData { .. } => "insufficient_data",
            Self::FetchFailed(_) => "fetch_failed",
            Self::ExtractFailed(_) => "extract_failed",
            Self::PersistFailed(_) => "persist_failed",
            Self::Faulted(_) => "faulted",
        }
    }
}

/// Immutable record of one finished cycle
#[derive(Debug)]
pub struct CycleReport {
    pub cycle_id: Uuid,
    pub started_at: DateTime<Local>,
    pub finished_at: DateTime<Local>,
    /// Snapshot downloaded in this cycle, if the fetch succeeded
    pub snapshot: Option<FetchedSnapshot>,
    pub outcome: CycleOutcome,
}

impl CycleReport {
    /// Report for a cycle whose task died before returning
    pub(crate) fn faulted(cycle_id: Uuid, started_at: DateTime<Local>, message: String) -> Self {
        Self {
            cycle_id,
            started_at,
            finished_at: Local::now(),
            snapshot: None,
            outcome: CycleOutcome::Faulted(message),
        }
    }
}

/// Fetch/extract/summarize/persist pipeline bound to one configuration
pub struct SyncPipeline {
    config: SyncConfig,
    store: ArtifactStore,
    client: ExportClient,
    trainer: Trainer,
}

impl SyncPipeline {
    /// Build the pipeline and create the working directories.
    ///
    /// Failing here is the only fatal condition; later directory
    /// problems only fail the cycle that hits them.
    pub fn new(config: SyncConfig) -> Result<Self, SetupError> {
        let store = ArtifactStore::new(&config.data_dir, &config.models_dir);
        store.ensure_dirs()?;

        let client = ExportClient::new(&config)?;
        let trainer = Trainer::new(config.min_samples);

        Ok(Self {
            config,
            store,
            client,
            trainer,
        })
    }

    pub fn config(&self) -> &SyncConfig {
        &self.config
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    pub async fn run_cycle(&self) -> CycleReport {
        self.run_cycle_as(Uuid::new_v4()).await
    }

    pub(crate) async fn run_cycle_as(&self, cycle_id: Uuid) -> CycleReport {
        let started_at = Local::now();
        log::info!("🔄 Starting sync cycle at {} ({})", started_at.format("%Y-%m-%d %H:%M:%S"), cycle_id);

        let (snapshot, outcome) = self.execute(started_at).await;

        CycleReport {
            cycle_id,
            started_at,
            finished_at: Local::now(),
            snapshot,
            outcome,
        }
    }

    async fn execute(&self, started_at: DateTime<Local>) -> (Option<FetchedSnapshot>, CycleOutcome) {
        if let Err(e) = self.store.ensure_dirs() {
            log::error!("❌ Storage unavailable: {}", e);
            return (None, CycleOutcome::PersistFailed(e));
        }

        let snapshot = match self.client.fetch_snapshot(&self.store, started_at).await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("❌ Failed to download data: {}", e);
                return (None, CycleOutcome::FetchFailed(e));
            }
        };
        log::debug!("Snapshot sha256: {}", snapshot.sha256);

        log::info!("🧠 Starting voice emotion training...");
        let dataset = match extract_samples(&snapshot.path, &self.config.records_key) {
            Ok(dataset) => dataset,
            Err(e) => {
                log::error!("❌ Training error: {}", e);
                return (Some(snapshot), CycleOutcome::ExtractFailed(e));
            }
        };

        let generated_at = Local::now();
        let version = self.store.reserve_version(generated_at);

        let artifact = match self.trainer.summarize(&dataset, generated_at, version) {
            TrainingOutcome::Trained(artifact) => artifact,
            TrainingOutcome::InsufficientData { found, required } => {
                log::info!(
                    "ℹ️ Insufficient training samples. Current: {}, Minimum: {}",
                    found,
                    required
                );
                return (Some(snapshot), CycleOutcome::InsufficientData { found, required });
            }
        };

        let saved = match save_artifact(&self.store, &artifact) {
            Ok(saved) => saved,
            Err(e) => {
                log::error!("❌ Failed to save model: {}", e);
                return (Some(snapshot), CycleOutcome::PersistFailed(e));
            }
        };

        let quality = DatasetQuality::from_sample_count(artifact.trained_on);

        log::info!("✅ Model saved: {}", saved.model_path.display());
        log::info!("🎯 Emotions covered: {:?}", artifact.emotions);
        log::info!(
            "📈 Simulated accuracy score: {}% (placeholder, no evaluation performed)",
            artifact.training_accuracy
        );
        if let Some((label, count)) = dataset.best_covered() {
            log::info!("🎭 Best emotion coverage: {} ({} samples)", label, count);
        }
        log::info!("📊 Training report saved: {}", saved.report_path.display());
        log::info!("🏆 {}: {}", quality, quality.expectation());

        (
            Some(snapshot),
            CycleOutcome::Trained {
                artifact,
                model_path: saved.model_path,
                report_path: saved.report_path,
                quality,
            },
        )
    }
}
