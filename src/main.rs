//! Voice Emotion Sync - Main Entry Point

use anyhow::Context;
use voice_emotion_sync::{constants, Scheduler, SyncConfig, SyncPipeline};

fn main() {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("❌ Automation error: {:#}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    log::info!("🤖 Starting {} v{}...", constants::APP_NAME, constants::APP_VERSION);

    let config = SyncConfig::from_env();
    log::info!("📡 Server: {}", config.server_url);
    log::info!(
        "   Data: {} | Models: {}",
        config.data_dir.display(),
        config.models_dir.display()
    );

    let pipeline = SyncPipeline::new(config).context("failed to initialize sync pipeline")?;
    log_inventory(&pipeline);
    let scheduler = Scheduler::new(pipeline);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("failed to create tokio runtime")?;

    log::info!("🛑 Press Ctrl+C to stop");
    let summary = rt.block_on(scheduler.run_until(shutdown_signal()));

    log::info!("Completed {} sync cycle(s)", summary.cycles_run);
    if let Some(last) = summary.last_sync {
        log::info!("Last sync: {}", last.format("%Y-%m-%d %H:%M:%S"));
    }
    Ok(())
}

/// Report what earlier runs left on disk
fn log_inventory(pipeline: &SyncPipeline) {
    let store = pipeline.store();
    match store.list_snapshots() {
        Ok(snapshots) => log::info!("📁 {} snapshot(s) on disk", snapshots.len()),
        Err(e) => log::warn!("⚠️ Could not list snapshots: {}", e),
    }
    match store.latest_model() {
        Ok(Some(path)) => log::info!("🧠 Latest model: {}", path.display()),
        Ok(None) => log::info!("🧠 No model built yet"),
        Err(e) => log::warn!("⚠️ Could not list models: {}", e),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the loop can only be stopped externally
        log::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
}
