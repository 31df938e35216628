//! Pinecone HTTP data-plane client.

use async_trait::async_trait;
use ndarray::Array1;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use curio_core::{Error, Result};

use crate::types::{RetrievedMatch, SimilarityIndex};

/// Client for a single Pinecone index, addressed by its data-plane host.
pub struct PineconeIndex {
    client: Client,
    host: String,
    api_key: String,
    dim: usize,
}

#[derive(Deserialize)]
struct QueryResponse {
    #[serde(default)]
    matches: Vec<RetrievedMatch>,
}

impl PineconeIndex {
    /// `host` is the index's data-plane URL
    /// (e.g. `https://product-xxxx.svc.us-east-1.pinecone.io`).
    pub fn new(client: Client, host: impl Into<String>, api_key: impl Into<String>, dim: usize) -> Self {
        let mut host = host.into();
        while host.ends_with('/') {
            host.pop();
        }
        Self {
            client,
            host,
            api_key: api_key.into(),
            dim,
        }
    }

    pub fn dimension(&self) -> usize {
        self.dim
    }
}

#[async_trait]
impl SimilarityIndex for PineconeIndex {
    async fn query(
        &self,
        vector: &Array1<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievedMatch>> {
        if top_k < 1 {
            return Err(Error::InvalidRequest("top_k must be >= 1".into()));
        }
        // Catch embedder/index misconfiguration before the round trip.
        if vector.len() != self.dim {
            return Err(Error::DimensionMismatch {
                expected: self.dim,
                actual: vector.len(),
            });
        }

        let body = json!({
            "vector": vector.to_vec(),
            "topK": top_k,
            "includeMetadata": include_metadata,
        });

        debug!("Index query: top_k={} host={}", top_k, self.host);

        let response = self
            .client
            .post(format!("{}/query", self.host))
            .header("Api-Key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("index request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::ServiceUnavailable(format!(
                "index API error {}: {}",
                status, body
            )));
        }

        let parsed: QueryResponse = response
            .json()
            .await
            .map_err(|e| Error::ServiceUnavailable(format!("index response decode: {}", e)))?;

        Ok(parsed.matches)
    }
}
