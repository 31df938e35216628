//! HTTP route handlers — matches the existing recommendation API surface.

pub mod analytics;
pub mod recommend;
pub mod status;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the main Axum router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(status::routes())
        .merge(recommend::routes())
        .merge(analytics::routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
