//! Echo generator - replies with the user's message.

use async_trait::async_trait;
use coach_core::{Completion, CompletionRequest, GenerationError, TextGenerator};

/// Marker preceding the user's message in a coach prompt.
const MESSAGE_MARKER: &str = "User's message: ";

/// A generator that echoes the user's message back.
///
/// If the prompt contains a `User's message:` line, only that message is
/// echoed; otherwise the whole prompt is.
#[derive(Debug, Clone, Default)]
pub struct EchoGenerator {
    /// Optional prefix to add before the echo.
    prefix: Option<String>,
}

impl EchoGenerator {
    /// Create a new EchoGenerator with no prefix.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new EchoGenerator with a custom prefix.
    pub fn with_prefix(prefix: impl Into<String>) -> Self {
        Self {
            prefix: Some(prefix.into()),
        }
    }
}

fn user_message(prompt: &str) -> &str {
    prompt
        .lines()
        .rev()
        .find_map(|line| line.strip_prefix(MESSAGE_MARKER))
        .unwrap_or(prompt)
}

#[async_trait]
impl TextGenerator for EchoGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GenerationError> {
        let message = user_message(&request.prompt);
        let reply = match &self.prefix {
            Some(prefix) => format!("{}{}", prefix, message),
            None => message.to_string(),
        };
        Ok(Completion::Text(reply))
    }

    fn name(&self) -> &str {
        "EchoGenerator"
    }
}
