//! Environment configuration with fail-fast credential validation.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default result count for a recommendation query.
pub const DEFAULT_TOP_K: usize = 5;

/// CLIP ViT-B/32 embedding dimensionality — what the product index was
/// built with.
pub const DEFAULT_EMBED_DIM: usize = 512;

/// Top-level Curio configuration.
///
/// Credentials for the index service and the generation provider are
/// required at startup: a missing key fails the process immediately rather
/// than failing every request later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurioConfig {
    /// HTTP server port.
    pub port: u16,
    /// Pinecone API key (`PINECONE_API_KEY`).
    pub pinecone_api_key: String,
    /// Pinecone index data-plane host URL (`PINECONE_INDEX_HOST`).
    pub pinecone_index_host: String,
    /// OpenAI API key, used for both embeddings and description generation
    /// (`OPENAI_API_KEY`).
    pub openai_api_key: String,
    /// Embedding dimensionality the index was built with.
    pub embedding_dim: usize,
    /// Max in-flight synthesis calls per request.
    pub synth_concurrency: usize,
    /// Sampling temperature for description generation.
    pub synth_temperature: f64,
    /// Path to the analytics CSV dataset.
    pub analytics_data_file: String,
}

impl CurioConfig {
    /// Build configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8000);

        let pinecone_api_key = require_var("PINECONE_API_KEY")?;
        let pinecone_index_host = require_var("PINECONE_INDEX_HOST")?;
        let openai_api_key = require_var("OPENAI_API_KEY")?;

        let embedding_dim = std::env::var("CURIO_EMBED_DIM")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_EMBED_DIM);

        let synth_concurrency = std::env::var("CURIO_SYNTH_CONCURRENCY")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|&n: &usize| n >= 1)
            .unwrap_or(4);

        let analytics_data_file = std::env::var("CURIO_DATA_FILE")
            .unwrap_or_else(|_| "./data/intern_data_ikarus.csv".to_string());

        Ok(Self {
            port,
            pinecone_api_key,
            pinecone_index_host,
            openai_api_key,
            embedding_dim,
            synth_concurrency,
            synth_temperature: 0.7,
            analytics_data_file,
        })
    }
}

fn require_var(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(Error::Config(format!(
            "required environment variable {} is not set",
            name
        ))),
    }
}
