//! Alert routes

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

/// Response for the alerts endpoint
#[derive(Debug, Serialize)]
pub struct AlertsResponse {
    /// Active alert keys, `<vehicle>:<type>`
    pub data: Vec<String>,
    pub count: usize,
}

/// Currently active alerts
pub async fn get_alerts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let data: Vec<String> = state
        .pipeline
        .active_alerts()
        .await
        .iter()
        .map(|key| key.to_string())
        .collect();
    let count = data.len();

    Json(AlertsResponse { data, count })
}

/// Response for a clear-all request
#[derive(Debug, Serialize)]
pub struct ClearedResponse {
    pub cleared: usize,
}

/// Dismiss every active alert; used on session reset
pub async fn clear_alerts(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let cleared = state.pipeline.active_alerts().await.len();
    state.pipeline.clear_all_alerts().await;

    Json(ClearedResponse { cleared })
}
