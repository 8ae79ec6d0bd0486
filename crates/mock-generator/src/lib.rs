//! Mock text generators for coach session testing.
//!
//! This crate provides mock implementations of the `TextGenerator` trait:
//! - `EchoGenerator` - Replies with the user's message
//! - `ScriptedGenerator` - Plays back canned replies and records prompts
//! - `FailingGenerator` - Always fails
//! - `DelayedGenerator` - Wraps another generator with artificial delay
//!
//! For real completions, use the `completion-client` crate instead.
//!
//! # Example
//!
//! ```rust
//! use mock_generator::{CompletionRequest, EchoGenerator, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), mock_generator::GenerationError> {
//!     let generator = EchoGenerator::new();
//!
//!     let request = CompletionRequest::text("User's message: Hello!");
//!     let reply = generator.complete(request).await?;
//!     println!("Reply: {}", reply.into_text());
//!     Ok(())
//! }
//! ```

mod delayed;
mod echo;
mod failing;
mod scripted;

// Re-export coach-core types for convenience
pub use coach_core::{async_trait, Completion, CompletionRequest, GenerationError, TextGenerator};

// Export mock implementations
pub use delayed::DelayedGenerator;
pub use echo::EchoGenerator;
pub use failing::{FailingGenerator, FailureMode};
pub use scripted::ScriptedGenerator;
