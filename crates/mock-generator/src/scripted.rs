//! Scripted generator - plays back canned replies and records every prompt.

use std::collections::VecDeque;

use async_trait::async_trait;
use coach_core::{Completion, CompletionRequest, GenerationError, TextGenerator};
use tokio::sync::Mutex;

#[derive(Debug, Clone)]
enum Step {
    Reply(String),
    Fail(String),
}

/// A generator that answers from a script, in order.
///
/// Once the script runs out every call fails with
/// [`GenerationError::Unavailable`]. Every request is recorded, including
/// the ones that fail.
#[derive(Debug, Default)]
pub struct ScriptedGenerator {
    steps: Mutex<VecDeque<Step>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedGenerator {
    /// Create a generator that answers with `replies`, in order.
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let steps = replies.into_iter().map(|r| Step::Reply(r.into())).collect();
        Self {
            steps: Mutex::new(steps),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Append a reply to the script.
    pub fn then_reply(mut self, reply: impl Into<String>) -> Self {
        self.steps.get_mut().push_back(Step::Reply(reply.into()));
        self
    }

    /// Append a failure to the script.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.steps.get_mut().push_back(Step::Fail(message.into()));
        self
    }

    /// Every prompt received so far, oldest first.
    pub async fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .await
            .iter()
            .map(|r| r.prompt.clone())
            .collect()
    }

    /// The most recent prompt, if any.
    pub async fn last_prompt(&self) -> Option<String> {
        self.requests.lock().await.last().map(|r| r.prompt.clone())
    }

    /// Number of calls made.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GenerationError> {
        self.requests.lock().await.push(request);

        match self.steps.lock().await.pop_front() {
            Some(Step::Reply(text)) => Ok(Completion::Text(text)),
            Some(Step::Fail(msg)) => Err(GenerationError::ProcessingFailed(msg)),
            None => Err(GenerationError::Unavailable("script exhausted".to_string())),
        }
    }

    fn name(&self) -> &str {
        "ScriptedGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_plays_script_in_order() {
        let generator = ScriptedGenerator::new(["first", "second"]).then_fail("boom");

        let a = generator.complete(CompletionRequest::text("p1")).await.unwrap();
        let b = generator.complete(CompletionRequest::text("p2")).await.unwrap();
        let c = generator.complete(CompletionRequest::text("p3")).await;
        let d = generator.complete(CompletionRequest::text("p4")).await;

        assert_eq!(a.into_text(), "first");
        assert_eq!(b.into_text(), "second");
        assert!(matches!(c, Err(GenerationError::ProcessingFailed(msg)) if msg == "boom"));
        assert!(matches!(d, Err(GenerationError::Unavailable(_))));
    }

    #[tokio::test]
    async fn test_records_prompts() {
        let generator = ScriptedGenerator::default().then_reply("ok");

        assert!(generator.last_prompt().await.is_none());
        generator.complete(CompletionRequest::text("hello")).await.unwrap();
        let _ = generator.complete(CompletionRequest::text("again")).await;

        assert_eq!(generator.call_count().await, 2);
        assert_eq!(generator.prompts().await, vec!["hello", "again"]);
        assert_eq!(generator.last_prompt().await.as_deref(), Some("again"));
    }
}
