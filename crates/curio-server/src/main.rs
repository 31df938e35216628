//! Curio — product recommendation and analytics server.

use std::sync::Arc;

use reqwest::Client;
use tracing::info;
use tracing_subscriber::EnvFilter;

use curio_core::CurioConfig;
use curio_embed::HttpEmbedder;
use curio_index::PineconeIndex;
use curio_pipeline::Recommender;
use curio_synth::{DescriptionSynthesizer, OpenAiGenerator};

mod analytics;
mod error;
mod routes;
mod state;

use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // Missing credentials fail here, not per request.
    let config = CurioConfig::from_env()
        .map_err(|e| anyhow::anyhow!("Failed to load configuration: {}", e))?;
    let port = config.port;

    // One HTTP client shared by every outbound backend.
    let client = Client::new();

    let embedder = Arc::new(HttpEmbedder::new(
        client.clone(),
        config.openai_api_key.clone(),
        config.embedding_dim,
    ));

    let index = Arc::new(PineconeIndex::new(
        client.clone(),
        config.pinecone_index_host.clone(),
        config.pinecone_api_key.clone(),
        config.embedding_dim,
    ));

    let generator = Arc::new(OpenAiGenerator::new(
        client,
        config.openai_api_key.clone(),
        config.synth_temperature,
    ));
    let synthesizer = Arc::new(DescriptionSynthesizer::new(generator));

    let recommender = Recommender::new(embedder, index, synthesizer, config.synth_concurrency);

    // Build application state and router
    let state = Arc::new(AppState::new(config, recommender));
    let app = routes::build_router(state);

    // Start server
    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Curio server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
