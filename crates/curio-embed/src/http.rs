//! OpenAI-compatible embeddings API backend.

use async_trait::async_trait;
use ndarray::Array1;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use curio_core::{Error, Result};

use crate::embedder::Embedder;

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/embeddings";
const DEFAULT_MODEL: &str = "text-embedding-3-small";

/// Remote embedding backend against an OpenAI-compatible `/v1/embeddings`
/// endpoint. Stateless per call; the reqwest client is shared and reused.
pub struct HttpEmbedder {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    dim: usize,
}

impl HttpEmbedder {
    pub fn new(client: Client, api_key: impl Into<String>, dim: usize) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            dim,
        }
    }

    /// Override the endpoint URL (self-hosted or compatible providers).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl Embedder for HttpEmbedder {
    async fn embed(&self, text: &str) -> Result<Array1<f32>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("query text is empty".into()));
        }

        let body = json!({
            "model": self.model,
            "input": text,
            "dimensions": self.dim,
        });

        debug!("Embedding request to {} with model {}", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("embedding request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServiceUnavailable(format!(
                "embedding API error {}: {}",
                status, body
            )));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("embedding response decode: {}", e)))?;

        let values = parsed["data"][0]["embedding"]
            .as_array()
            .ok_or_else(|| {
                Error::ServiceUnavailable("embedding response missing data[0].embedding".into())
            })?;

        let vector: Array1<f32> = values
            .iter()
            .map(|v| v.as_f64().unwrap_or(0.0) as f32)
            .collect();

        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
