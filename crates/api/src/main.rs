//! Ground Station Alert Pipeline - Main Entry Point

use alerting::ChannelSink;
use api::{init_logging, run_server, AppState, Settings};
use ingest::TelemetryPipeline;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let settings = Settings::load()?;
    info!("=== GCS Alert Pipeline v{} ===", env!("CARGO_PKG_VERSION"));

    let (sink, mut notifications) = ChannelSink::new();
    let pipeline = Arc::new(TelemetryPipeline::new(
        settings.ingest.clone(),
        settings.thresholds.clone(),
        Arc::new(sink),
    ));

    // Display bridge boundary: the toast renderer drains this channel.
    // Until a front end attaches, events are logged.
    tokio::spawn(async move {
        while let Some(event) = notifications.recv().await {
            info!(?event, "notification");
        }
    });

    let (frame_tx, frame_rx) = mpsc::channel(256);
    let ingest = pipeline.clone();
    tokio::spawn(async move {
        if let Err(e) = ingest.run(frame_rx).await {
            error!(error = %e, "telemetry intake stopped");
        }
    });

    let state = Arc::new(AppState::new(pipeline, frame_tx));
    run_server(&settings.listen_addr, state).await
}
