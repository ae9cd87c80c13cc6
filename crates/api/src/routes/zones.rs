//! Keep-out-zone routes

use crate::AppState;
use axum::{extract::State, response::IntoResponse, Json};
use geo::ZoneUpload;
use serde::Serialize;
use std::sync::Arc;

/// Response for a zone upload
#[derive(Debug, Serialize)]
pub struct ZonesResponse {
    /// Polygons accepted and stored
    pub stored: usize,
}

/// Replace all keep-out zones with the uploaded set
pub async fn put_zones(
    State(state): State<Arc<AppState>>,
    Json(uploads): Json<Vec<ZoneUpload>>,
) -> impl IntoResponse {
    let stored = state.pipeline.update_zones(uploads).await;
    Json(ZonesResponse { stored })
}
