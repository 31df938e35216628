//! Generative model invocation.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::json;
use tracing::debug;

use curio_core::{Error, Result};

const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Trait for text-generation backends.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Run one completion for `prompt` and return the raw model text.
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// OpenAI chat-completions backend. One round trip per call, no streaming:
/// each item's description is a single short completion.
pub struct OpenAiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f64,
}

impl OpenAiGenerator {
    pub fn new(client: Client, api_key: impl Into<String>, temperature: f64) -> Self {
        Self {
            client,
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key: api_key.into(),
            temperature,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
        });

        debug!("Generation request to {} with model {}", self.endpoint, self.model);

        let response = self
            .client
            .post(&self.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Synthesis(format!("generation request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Synthesis(format!(
                "generation API error {}: {}",
                status, body
            )));
        }

        let parsed: serde_json::Value = response
            .json()
            .await
            .map_err(|e| Error::Synthesis(format!("generation response decode: {}", e)))?;

        let text = parsed["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| Error::Synthesis("generation response missing content".into()))?;

        Ok(text.to_string())
    }
}
