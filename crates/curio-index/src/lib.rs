//! Curio Index — nearest-neighbor retrieval against a vector index.
//!
//! The `SimilarityIndex` trait abstracts over index backends:
//! - `PineconeIndex`: the managed service's HTTP data plane
//! - `MemoryIndex`: in-process cosine index for tests and local dev

pub mod memory;
pub mod pinecone;
pub mod types;

pub use memory::MemoryIndex;
pub use pinecone::PineconeIndex;
pub use types::{MatchMetadata, RetrievedMatch, SimilarityIndex};
