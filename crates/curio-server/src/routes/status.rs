//! Root status route.

use std::sync::Arc;

use axum::routing::get;
use axum::{Json, Router};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/", get(read_root))
}

/// GET / — confirm the API is running.
async fn read_root() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "API is running." }))
}
