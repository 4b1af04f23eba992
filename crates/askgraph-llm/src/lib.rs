//! Askgraph LLM: text-completion service interface
//!
//! The QA pipeline treats the language model as an opaque single-shot
//! completion service: prompt in, text out. Providers implement
//! [`CompletionService`]; the pipeline never sees transport details.
//!
//! Shipped providers:
//! - [`ollama::OllamaClient`] — local models via the Ollama generate API.
//! - [`openai::OpenAiClient`] — any OpenAI-compatible chat endpoint.
//! - [`MockCompletion`] — scripted responses for tests.
//!
//! No retry or timeout policy lives here beyond the per-request HTTP
//! timeout; callers needing resilience wrap the trait.

pub mod ollama;
pub mod openai;

pub use ollama::{OllamaClient, OllamaConfig};
pub use openai::{OpenAiClient, OpenAiConfig};

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// Errors surfaced by a completion provider.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CompletionError {
    #[error("completion API error: {0}")]
    Api(String),
    #[error("completion network error: {0}")]
    Network(String),
    #[error("invalid completion response: {0}")]
    InvalidResponse(String),
}

/// Capability interface over a text-completion service.
#[async_trait::async_trait]
pub trait CompletionService: Send + Sync {
    /// Generate one completion for `prompt` with the given model
    /// identifier. Synchronous round trip, no streaming.
    async fn complete(&self, prompt: &str, model: &str) -> Result<String, CompletionError>;
}

/// Scripted completion service for tests.
///
/// Responses are served in order, cycling when exhausted. Prompts are
/// recorded so tests can assert what the pipeline asked.
pub struct MockCompletion {
    responses: Vec<String>,
    next: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl MockCompletion {
    pub fn new(responses: Vec<String>) -> Self {
        Self {
            responses,
            next: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(response: &str) -> Self {
        Self::new(vec![response.to_string()])
    }

    /// Every prompt this service has been asked to complete, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionService for MockCompletion {
    async fn complete(&self, prompt: &str, _model: &str) -> Result<String, CompletionError> {
        self.prompts.lock().unwrap().push(prompt.to_string());

        let idx = self.next.fetch_add(1, Ordering::SeqCst);
        self.responses
            .get(idx % self.responses.len().max(1))
            .cloned()
            .ok_or_else(|| CompletionError::Api("mock has no responses".to_string()))
    }
}
