//! Request and response records.

use curio_core::config::DEFAULT_TOP_K;
use serde::{Deserialize, Serialize};

/// A recommendation query. Ephemeral, one per request.
#[derive(Debug, Clone, Deserialize)]
pub struct Query {
    /// Free-text search query.
    #[serde(alias = "text")]
    pub query: String,
    /// Number of results to return.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
}

fn default_top_k() -> usize {
    DEFAULT_TOP_K
}

/// One recommended product, in the wire shape the frontend consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(rename = "imageUrl")]
    pub image_url: String,
    pub description: String,
    #[serde(rename = "generatedDescription")]
    pub generated_description: String,
}
