//! Delayed generator - wraps another generator with artificial delay.

use std::time::Duration;

use async_trait::async_trait;
use coach_core::{Completion, CompletionRequest, GenerationError, TextGenerator};
use tokio::time::sleep;

/// A generator that wraps another generator and adds artificial delay.
///
/// Useful for testing timeouts and the in-flight guard.
pub struct DelayedGenerator<G: TextGenerator> {
    inner: G,
    delay: Duration,
}

impl<G: TextGenerator> DelayedGenerator<G> {
    /// Create a new DelayedGenerator wrapping the given generator with the specified delay.
    pub fn new(inner: G, delay: Duration) -> Self {
        Self { inner, delay }
    }

    /// Create a generator with a delay in milliseconds.
    pub fn with_millis(inner: G, millis: u64) -> Self {
        Self::new(inner, Duration::from_millis(millis))
    }

    /// Create a generator with a delay in seconds.
    pub fn with_secs(inner: G, secs: u64) -> Self {
        Self::new(inner, Duration::from_secs(secs))
    }

    /// The wrapped generator.
    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: TextGenerator> TextGenerator for DelayedGenerator<G> {
    async fn complete(&self, request: CompletionRequest) -> Result<Completion, GenerationError> {
        sleep(self.delay).await;
        self.inner.complete(request).await
    }

    fn name(&self) -> &str {
        "DelayedGenerator"
    }

    async fn is_ready(&self) -> bool {
        self.inner.is_ready().await
    }
}
