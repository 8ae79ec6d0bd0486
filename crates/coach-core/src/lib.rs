//! Core types and collaborator traits for the VITA coach engine.
//!
//! This crate provides the shared vocabulary used by every other crate
//! in the workspace. It defines:
//!
//! - [`ConversationTurn`] / [`Conversation`] - The persisted chat model
//! - [`TextGenerator`] - The trait every text-generation backend implements
//! - [`IdentityProvider`] - Resolves the authenticated user for a session
//! - [`GenerationError`] / [`IdentityError`] - Error types for collaborators
//!
//! # Example
//!
//! ```rust
//! use coach_core::{async_trait, Completion, CompletionRequest, GenerationError, TextGenerator};
//!
//! struct Canned;
//!
//! #[async_trait]
//! impl TextGenerator for Canned {
//!     async fn complete(
//!         &self,
//!         _request: CompletionRequest,
//!     ) -> Result<Completion, GenerationError> {
//!         Ok(Completion::text("Drink some water!"))
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Canned"
//!     }
//! }
//! ```

mod error;
mod generator;
mod identity;
mod prompt;
mod turn;

pub use error::{GenerationError, IdentityError};
pub use generator::{Completion, CompletionRequest, TextGenerator};
pub use identity::{Identity, IdentityProvider, StaticIdentity};
pub use prompt::{hash_prompt, PromptFingerprint};
pub use turn::{Conversation, ConversationTurn, Role};

// Re-export async_trait for convenience
pub use async_trait::async_trait;
