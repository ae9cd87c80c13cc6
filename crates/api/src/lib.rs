//! Ground Station Query Surface
//!
//! REST API over the live telemetry snapshot, active alerts, heartbeat
//! state, and keep-out zones, plus the frame intake endpoint the transport
//! bridge posts to.

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use ingest::{ConnectionStatus, TelemetryPipeline};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower_http::trace::TraceLayer;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

mod routes;
mod settings;

pub use settings::Settings;

/// Application state shared across handlers
pub struct AppState {
    /// The ingest pipeline backing all queries
    pub pipeline: Arc<TelemetryPipeline>,
    /// Intake channel the transport bridge feeds
    pub frames: mpsc::Sender<Vec<u8>>,
    /// Version string
    pub version: String,
    /// Start time
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create new application state
    pub fn new(pipeline: Arc<TelemetryPipeline>, frames: mpsc::Sender<Vec<u8>>) -> Self {
        Self {
            pipeline,
            frames,
            version: env!("CARGO_PKG_VERSION").to_string(),
            start_time: std::time::Instant::now(),
        }
    }
}

/// Health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
    pub uptime_seconds: u64,
    pub vehicles: Vec<ConnectionStatus>,
    pub active_alerts: usize,
}

/// Create the application router
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(health_handler))
        .route(
            "/api/v1/telemetry",
            get(routes::telemetry::get_snapshot).post(routes::telemetry::push_frame),
        )
        .route(
            "/api/v1/alerts",
            get(routes::alerts::get_alerts).delete(routes::alerts::clear_alerts),
        )
        .route("/api/v1/zones", put(routes::zones::put_zones))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check handler
async fn health_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let response = HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        version: state.version.clone(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        vehicles: state.pipeline.connection_status().await,
        active_alerts: state.pipeline.active_alerts().await.len(),
    };

    Json(response)
}

/// Initialize logging
pub fn init_logging() {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(true)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

/// Run the server until shutdown
pub async fn run_server(
    addr: &str,
    state: Arc<AppState>,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    info!("Starting query surface on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
