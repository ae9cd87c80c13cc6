//! Telemetry routes

use crate::AppState;
use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;
use tracing::warn;

/// Current snapshot of all vehicles
pub async fn get_snapshot(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.pipeline.snapshot().await)
}

/// Accept one raw telemetry frame from the transport bridge
///
/// The frame is queued for the ingest loop; decoding and validation happen
/// there, so a bad payload still gets a 202 here.
pub async fn push_frame(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> StatusCode {
    match state.frames.send(body.to_vec()).await {
        Ok(()) => StatusCode::ACCEPTED,
        Err(_) => {
            warn!("telemetry intake is closed, frame rejected");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}
