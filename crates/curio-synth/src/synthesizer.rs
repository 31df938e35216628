//! Prompt → model → trimmed text.

use std::sync::Arc;

use curio_core::{Error, Result};

use crate::generator::TextGenerator;
use crate::prompt::build_prompt;

/// Wraps a generative backend behind the fixed prompt template.
///
/// The caller never receives blank output: empty model text is an error
/// here so the pipeline's fallback branch can take over.
pub struct DescriptionSynthesizer {
    generator: Arc<dyn TextGenerator>,
}

impl DescriptionSynthesizer {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Produce an enhanced description for one item.
    pub async fn synthesize(&self, item_name: &str, original_description: &str) -> Result<String> {
        let prompt = build_prompt(item_name, original_description);
        let raw = self.generator.generate(&prompt).await?;
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Synthesis("model returned empty text".into()));
        }
        Ok(trimmed.to_string())
    }
}
