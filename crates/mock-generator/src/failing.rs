//! Failing generator - every call errors or comes back empty.

use async_trait::async_trait;
use coach_core::{Completion, CompletionRequest, GenerationError, TextGenerator};

/// How a [`FailingGenerator`] fails.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureMode {
    /// Return [`GenerationError::Unavailable`].
    Unavailable(String),
    /// Return [`GenerationError::Network`].
    Network(String),
    /// Return [`GenerationError::ProcessingFailed`].
    Processing(String),
    /// Succeed with a blank reply.
    BlankReply,
}

/// A generator that never produces a usable reply.
#[derive(Debug, Clone)]
pub struct FailingGenerator {
    mode: FailureMode,
}

impl FailingGenerator {
    pub fn new(mode: FailureMode) -> Self {
        Self { mode }
    }

    /// Fail with a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(FailureMode::Network(message.into()))
    }

    /// Answer with whitespace only.
    pub fn blank() -> Self {
        Self::new(FailureMode::BlankReply)
    }
}

#[async_trait]
impl TextGenerator for FailingGenerator {
    async fn complete(&self, _request: CompletionRequest) -> Result<Completion, GenerationError> {
        match &self.mode {
            FailureMode::Unavailable(msg) => Err(GenerationError::Unavailable(msg.clone())),
            FailureMode::Network(msg) => Err(GenerationError::Network(msg.clone())),
            FailureMode::Processing(msg) => Err(GenerationError::ProcessingFailed(msg.clone())),
            FailureMode::BlankReply => Ok(Completion::text("   ")),
        }
    }

    fn name(&self) -> &str {
        "FailingGenerator"
    }

    async fn is_ready(&self) -> bool {
        !matches!(self.mode, FailureMode::Unavailable(_))
    }
}
