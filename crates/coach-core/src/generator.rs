//! The text-generation collaborator contract.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::GenerationError;

/// A single request to a text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// The fully rendered prompt.
    pub prompt: String,
    /// Optional file references (e.g. uploaded images) the model may read.
    pub file_urls: Vec<String>,
    /// Optional JSON schema the reply must conform to.
    pub response_schema: Option<Value>,
}

impl CompletionRequest {
    /// Create a plain text request.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            file_urls: Vec::new(),
            response_schema: None,
        }
    }

    /// Attach a file reference.
    pub fn with_file(mut self, url: impl Into<String>) -> Self {
        self.file_urls.push(url.into());
        self
    }

    /// Ask for a structured reply matching `schema`.
    pub fn with_schema(mut self, schema: Value) -> Self {
        self.response_schema = Some(schema);
        self
    }

    /// Whether a structured reply was requested.
    pub fn wants_structured(&self) -> bool {
        self.response_schema.is_some()
    }
}

/// The reply from a text-generation backend.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    /// Free-form text.
    Text(String),
    /// A JSON document produced against a response schema.
    Structured(Value),
}

impl Completion {
    /// Create a text completion.
    pub fn text(content: impl Into<String>) -> Self {
        Completion::Text(content.into())
    }

    /// Consume the completion as reply text.
    ///
    /// Structured replies are serialized back to compact JSON.
    pub fn into_text(self) -> String {
        match self {
            Completion::Text(text) => text,
            Completion::Structured(value) => value.to_string(),
        }
    }

    /// True when the completion carries no visible content.
    pub fn is_blank(&self) -> bool {
        match self {
            Completion::Text(text) => text.trim().is_empty(),
            Completion::Structured(value) => value.is_null(),
        }
    }
}

/// A backend that turns a prompt into a completion.
///
/// Latency is unbounded from the caller's point of view; callers that need
/// a bound wrap the call in a timeout. This trait is object-safe and can be
/// used as `Arc<dyn TextGenerator>`.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Produce a completion for the request.
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GenerationError>;

    /// Get a human-readable name for this generator.
    fn name(&self) -> &str;

    /// Check if the generator is ready to accept requests.
    ///
    /// Default implementation always returns true.
    async fn is_ready(&self) -> bool {
        true
    }
}
