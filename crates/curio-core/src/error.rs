//! Error types for Curio.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Malformed client input. Rejected before any external call.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An upstream dependency (embedding or index service) failed or could
    /// not be reached. Fatal to the request: a recommendation list with no
    /// retrieval basis is not a degraded result.
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    /// The query vector's dimensionality does not match the index's.
    /// A deployment fault, not a client error.
    #[error("Dimension mismatch: embedder produced {actual}, index expects {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Text generation failed for a single item. Recovered locally by the
    /// pipeline; never surfaced to the caller.
    #[error("Synthesis error: {0}")]
    Synthesis(String),

    /// Backing data file absent (analytics dataset).
    #[error("Resource not found: {0}")]
    MissingResource(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type Result<T> = std::result::Result<T, Error>;
