//! Shared fixtures for unit tests: snapshot builders and a fake export server.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use serde_json::{json, Value};

use crate::logic::config::SyncConfig;

/// A record that qualifies for training
pub fn qualifying_record(emotion: &str, confidence: f64) -> Value {
    json!({
        "emotion": emotion,
        "confidence": confidence,
        "transcript": format!("I feel {}", emotion),
        "voiceFeatures": {
            "mfcc": [1.5, -2.25, 3.0],
            "pitch": 220.0,
            "energy": 0.42,
            "spectralCentroid": 1800.5,
            "zcr": 0.08
        },
        "bertAnalysis": { "label": emotion, "score": 0.9 },
        "ip": "10.0.0.7",
        "timestamp": "2024-03-09T14:05:07.000Z",
        "sessionId": "session-42"
    })
}

/// Export payload with the records under `metadata`
pub fn snapshot_with(records: Vec<Value>) -> Value {
    json!({
        "metadata": records,
        "sessions": [],
        "exportTime": "2024-03-09T14:05:07.000Z"
    })
}

/// `count` qualifying records, all labelled `emotion`
pub fn uniform_snapshot(emotion: &str, count: usize) -> Value {
    snapshot_with((0..count).map(|_| qualifying_record(emotion, 85.0)).collect())
}

/// Handle to a running fake export server
pub struct FakeExportServer {
    pub base_url: String,
    hits: Arc<AtomicUsize>,
}

impl FakeExportServer {
    pub fn hits(&self) -> usize {
        self.hits.load(Ordering::SeqCst)
    }
}

/// Serve `body` with `status` on `/api/data/export`, optionally after `delay`
pub async fn spawn_export_server(
    status: StatusCode,
    body: String,
    delay: Option<Duration>,
) -> FakeExportServer {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);

    let app = Router::new().route(
        "/api/data/export",
        get(move || {
            let body = body.clone();
            counter.fetch_add(1, Ordering::SeqCst);
            async move {
                if let Some(delay) = delay {
                    tokio::time::sleep(delay).await;
                }
                (status, body)
            }
        }),
    );

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeExportServer {
        base_url: format!("http://{}", addr),
        hits,
    }
}

/// Config pointing at `base_url` with directories under `root`
pub fn test_config(base_url: &str, root: &Path) -> SyncConfig {
    SyncConfig {
        server_url: base_url.to_string(),
        data_dir: root.join("data"),
        models_dir: root.join("models"),
        request_timeout: Duration::from_secs(5),
        ..Default::default()
    }
}

/// Number of regular files in `dir` (0 if it does not exist)
pub fn file_count(dir: &Path) -> usize {
    std::fs::read_dir(dir)
        .map(|entries| entries.filter_map(|e| e.ok()).count())
        .unwrap_or(0)
}
