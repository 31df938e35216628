//! In-process cosine similarity index.
//!
//! Backs tests and offline development; the production backend is
//! `PineconeIndex`.

use async_trait::async_trait;
use ndarray::Array1;

use curio_core::{Error, Result};

use crate::types::{MatchMetadata, RetrievedMatch, SimilarityIndex};

struct Entry {
    id: String,
    vector: Array1<f32>,
    metadata: MatchMetadata,
}

/// Brute-force cosine index over an in-memory item set.
#[derive(Default)]
pub struct MemoryIndex {
    entries: Vec<Entry>,
    dim: Option<usize>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an item. The first insert fixes the index dimensionality.
    pub fn insert(
        &mut self,
        id: impl Into<String>,
        vector: Array1<f32>,
        metadata: MatchMetadata,
    ) -> Result<()> {
        let dim = *self.dim.get_or_insert(vector.len());
        if vector.len() != dim {
            return Err(Error::DimensionMismatch {
                expected: dim,
                actual: vector.len(),
            });
        }
        self.entries.push(Entry {
            id: id.into(),
            vector,
            metadata,
        });
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn cosine(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    let dot = a.dot(b);
    let norm = a.dot(a).sqrt() * b.dot(b).sqrt();
    if norm < 1e-12 {
        0.0
    } else {
        dot / norm
    }
}

#[async_trait]
impl SimilarityIndex for MemoryIndex {
    async fn query(
        &self,
        vector: &Array1<f32>,
        top_k: usize,
        include_metadata: bool,
    ) -> Result<Vec<RetrievedMatch>> {
        if top_k < 1 {
            return Err(Error::InvalidRequest("top_k must be >= 1".into()));
        }
        if let Some(dim) = self.dim {
            if vector.len() != dim {
                return Err(Error::DimensionMismatch {
                    expected: dim,
                    actual: vector.len(),
                });
            }
        }

        let mut scored: Vec<RetrievedMatch> = self
            .entries
            .iter()
            .map(|e| RetrievedMatch {
                id: e.id.clone(),
                score: cosine(vector, &e.vector),
                metadata: if include_metadata {
                    e.metadata.clone()
                } else {
                    MatchMetadata::default()
                },
            })
            .collect();

        // Descending score; insertion order breaks ties (stable sort).
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);
        Ok(scored)
    }
}
