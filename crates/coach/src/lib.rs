//! AI coach session engine for VITA.
//!
//! This crate provides the [`Coach`] type which opens per-user
//! [`ChatSession`]s. A session turns one user message into a persisted
//! user/assistant exchange, personalized with the user's health data.
//!
//! # Features
//!
//! - Reads today's health signals from five sources concurrently
//! - Bounds the prompt to the last six conversation turns
//! - Keeps one active conversation per user, grown in turn pairs
//! - Guards against overlapping exchanges and bounds generation time
//!
//! # Architecture
//!
//! ```text
//! submit / quick prompt
//!          ↓
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      CHAT SESSION                           │
//! │                                                             │
//! │  1. Idle → Sending (rejected if already Sending)            │
//! │         ↓                                                   │
//! │  2. Aggregate context (5 reads joined, all-or-nothing)      │
//! │         ↓                                                   │
//! │  3. Build prompt (preamble, context, last 6 turns, message) │
//! │         ↓                                                   │
//! │  4. Generate reply (bounded by a timeout)                   │
//! │         ↓                                                   │
//! │  5. Append user + assistant turns, persist                  │
//! │         ↓                                                   │
//! │  6. Sending → Idle, or → Failed on any error                │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use coach::{Coach, CoachConfig, SqliteEntityStore, StaticIdentity, Identity};
//! use completion_client::{CompletionClient, CompletionClientConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = CoachConfig::from_env();
//!     let store = SqliteEntityStore::open(&config.database_url).await?;
//!     let generator = CompletionClient::new(CompletionClientConfig::from_env()?)?;
//!     let coach = Coach::new(Arc::new(store), Arc::new(generator), config);
//!
//!     let me = StaticIdentity::new(Identity::new("user-123", "Maya Lopez", "maya@example.com"));
//!     let session = coach.open_session(&me).await?;
//!
//!     session.set_input("Help me sleep better").await;
//!     let outcome = session.submit().await?;
//!     println!("{outcome:?}");
//!     Ok(())
//! }
//! ```

mod aggregator;
mod coach;
mod config;
mod context;
mod conversation;
mod error;
mod memory_store;
mod observer;
mod prompt;
mod session;
mod sqlite_store;
mod store;

// Public exports
pub use aggregator::{HealthContextAggregator, MOOD_WINDOW, WORKOUT_WINDOW};
pub use coach::Coach;
pub use config::{CoachConfig, CoachConfigBuilder};
pub use context::{ContextSources, HealthContextSnapshot};
pub use conversation::{conversation_title, ConversationStore};
pub use error::{CoachError, FailureKind, StoreError};
pub use memory_store::InMemoryEntityStore;
pub use observer::{LoggingObserver, NoOpObserver, SessionObserver};
pub use prompt::{render_transcript, transcript_window, PromptBuilder, TRANSCRIPT_WINDOW};
pub use session::{ChatSession, IgnoreReason, SessionState, SubmitOutcome, QUICK_PROMPTS};
pub use sqlite_store::SqliteEntityStore;
pub use store::{EntityKind, EntityStore, NewConversation, StoreResult};

// Re-export commonly used types from dependencies
pub use coach_core::{
    Completion, CompletionRequest, Conversation, ConversationTurn, GenerationError, Identity,
    IdentityProvider, Role, StaticIdentity, TextGenerator,
};
