//! Recommendation route — the pipeline's inbound surface.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use tracing::info;

use curio_pipeline::{Product, Query};

use crate::error::ApiError;
use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/recommend", post(recommend))
}

/// POST /recommend — embed the query, retrieve the nearest products, and
/// attach a freshly generated description to each.
async fn recommend(
    State(state): State<Arc<AppState>>,
    Json(query): Json<Query>,
) -> Result<Json<Vec<Product>>, ApiError> {
    let products = state.recommender.recommend(&query).await?;
    info!(
        "Recommended {} products for top_k={}",
        products.len(),
        query.top_k
    );
    Ok(Json(products))
}
