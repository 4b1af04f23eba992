//! Ollama provider for local model inference.
//!
//! Uses the non-streaming generate endpoint: one request, one completed
//! response body.

use crate::{CompletionError, CompletionService};
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL of the Ollama server, e.g. `http://localhost:11434`.
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:11434".to_string(),
            timeout_secs: 120,
        }
    }
}

impl OllamaConfig {
    /// Load from `OLLAMA_URL`, falling back to the local default.
    pub fn from_env() -> Self {
        Self {
            base_url: std::env::var("OLLAMA_URL")
                .unwrap_or_else(|_| "http://localhost:11434".to_string()),
            timeout_secs: 120,
        }
    }
}

pub struct OllamaClient {
    client: Client,
    config: OllamaConfig,
}

#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

impl OllamaClient {
    pub fn new(config: OllamaConfig) -> Result<Self, CompletionError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }
}

#[async_trait::async_trait]
impl CompletionService for OllamaClient {
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, CompletionError> {
        tracing::debug!(model = %model, prompt_chars = prompt.len(), "ollama completion");
        let url = format!("{}/api/generate", self.config.base_url.trim_end_matches('/'));
        let body = serde_json::json!({
            "model": model,
            "prompt": prompt,
            "stream": false,
        });

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| CompletionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(CompletionError::Api(format!(
                "ollama returned HTTP {status}: {detail}"
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| CompletionError::InvalidResponse(e.to_string()))?;

        Ok(parsed.response)
    }
}
