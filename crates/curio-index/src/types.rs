//! Retrieval types and the index trait.

use async_trait::async_trait;
use ndarray::Array1;
use serde::{Deserialize, Serialize};

use curio_core::Result;

/// Item metadata stored alongside each vector.
///
/// Every field may be absent in the index; defaults are applied where the
/// metadata is consumed, so one incomplete item never fails a request.
/// Unknown keys are kept in `extra` rather than dropped.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MatchMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub images: Option<String>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl MatchMetadata {
    /// Item name, `"N/A"` when untitled.
    pub fn name(&self) -> String {
        self.title.clone().unwrap_or_else(|| "N/A".to_string())
    }

    /// Original description, empty when absent.
    pub fn description(&self) -> String {
        self.description.clone().unwrap_or_default()
    }

    /// Image URL, empty when absent.
    pub fn image_url(&self) -> String {
        self.images.clone().unwrap_or_default()
    }
}

/// A single nearest-neighbor hit, as returned by the index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievedMatch {
    /// Opaque per-item identifier.
    pub id: String,
    /// Similarity score; matches arrive in descending score order.
    pub score: f32,
    /// Stored metadata. Absent entirely when `include_metadata` was false.
    #[serde(default)]
    pub metadata: MatchMetadata,
}

/// Trait for similarity index backends. Read-only.
#[async_trait]
pub trait SimilarityIndex: Send + Sync {
    /// Return up to `top_k` nearest matches to `vector`, ordered by
    /// descending similarity. Fewer than `top_k` stored items is not an
    /// error; the caller gets whatever exists.
    ///
    /// Fails with `DimensionMismatch` when `vector` does not match the
    /// index's dimensionality, and `ServiceUnavailable` when the backend
    /// cannot be reached.
    async fn query(
        &self,
        vector: &Array1<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievedMatch>>;
}
