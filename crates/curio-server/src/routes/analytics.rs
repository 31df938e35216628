//! Analytics route — dataset summary statistics.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/analytics", get(get_analytics))
}

/// GET /analytics — product count, category distribution, price statistics.
///
/// The CSV read is blocking I/O, so it runs on the blocking pool.
async fn get_analytics(
    State(state): State<Arc<AppState>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let path = state.config.analytics_data_file.clone();
    let report = tokio::task::spawn_blocking(move || crate::analytics::summarize(&path))
        .await
        .map_err(|e| curio_core::Error::Internal(format!("analytics task failed: {}", e)))??;
    Ok(Json(report))
}
