//! Chat-completions text generator.
//!
//! This crate provides a [`TextGenerator`] that talks to an
//! OpenAI-compatible `/v1/chat/completions` endpoint.
//!
//! # Features
//!
//! - Sends the fully rendered prompt as a single user message
//! - Attaches file references as `image_url` content parts
//! - Requests schema-constrained JSON replies via `response_format`
//! - Configurable via environment variables
//!
//! # Usage
//!
//! ```rust,no_run
//! use completion_client::{CompletionClient, CompletionRequest, TextGenerator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = CompletionClient::from_env()?;
//!     let reply = client
//!         .complete(CompletionRequest::text("Suggest a workout for today"))
//!         .await?;
//!     println!("{}", reply.into_text());
//!     Ok(())
//! }
//! ```

mod api_types;
mod client;
mod config;

pub use client::CompletionClient;
pub use config::{CompletionClientConfig, CompletionClientConfigBuilder};

// Re-export coach-core types for convenience
pub use coach_core::{async_trait, Completion, CompletionRequest, GenerationError, TextGenerator};
