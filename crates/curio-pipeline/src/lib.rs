//! Curio Pipeline — the recommendation orchestrator.
//!
//! Linear per-request pipeline: query text → embedding → nearest-neighbor
//! retrieval → per-item description synthesis → ordered `Product` list.
//! Retrieval failures abort the request; synthesis failures degrade one
//! item's generated text to its original description.

pub mod recommender;
pub mod types;

pub use recommender::Recommender;
pub use types::{Product, Query};
