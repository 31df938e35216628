//! Curio Embed — maps free text into the shared semantic vector space.
//!
//! The `Embedder` trait abstracts over embedding generation.
//! Implementations:
//! - `HttpEmbedder`: OpenAI-compatible embeddings API over reqwest
//! - `HashEmbedder`: deterministic offline backend for tests and local dev

pub mod embedder;
pub mod http;

pub use embedder::{Embedder, HashEmbedder};
pub use http::HttpEmbedder;
