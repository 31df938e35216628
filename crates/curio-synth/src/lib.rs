//! Curio Synth — rewrites product descriptions through a generative model.
//!
//! A fixed prompt template substitutes the item name and original
//! description verbatim; the model's trimmed output becomes the enhanced
//! description. Best-effort enrichment: the pipeline falls back to the
//! original text when a generation fails.

pub mod generator;
pub mod prompt;
pub mod synthesizer;

pub use generator::{OpenAiGenerator, TextGenerator};
pub use prompt::build_prompt;
pub use synthesizer::DescriptionSynthesizer;
