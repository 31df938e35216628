//! Embedding trait and the deterministic offline backend.

use async_trait::async_trait;
use ndarray::Array1;

use curio_core::{Error, Result};

/// Trait for embedding backends.
///
/// Semantically similar strings must map to vectors with high cosine
/// similarity; the output length is `dimension()` on every call.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Generate an embedding for a text string.
    ///
    /// Empty input is rejected with `InvalidRequest`. A backend that cannot
    /// be reached fails with `ServiceUnavailable`, never a silent empty
    /// vector.
    async fn embed(&self, text: &str) -> Result<Array1<f32>>;

    /// The embedding dimension this backend produces.
    fn dimension(&self) -> usize;
}

/// Deterministic hash-based embedder.
///
/// No semantic meaning — identical inputs produce identical vectors, which
/// is all the pipeline tests and offline development need.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    async fn embed(&self, text: &str) -> Result<Array1<f32>> {
        if text.trim().is_empty() {
            return Err(Error::InvalidRequest("query text is empty".into()));
        }

        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let seed = hasher.finish();

        // Spread hash bits across the vector, then L2-normalize so cosine
        // similarity behaves.
        let raw: Vec<f32> = (0..self.dim)
            .map(|i| {
                let bit = (seed >> (i % 64)) & 1;
                if bit == 1 { 1.0 } else { -1.0 }
            })
            .collect();
        let norm = (raw.iter().map(|v| v * v).sum::<f32>()).sqrt();
        Ok(Array1::from_iter(raw.into_iter().map(|v| v / norm)))
    }

    fn dimension(&self) -> usize {
        self.dim
    }
}
