//! Error types for collaborator operations.

use std::time::Duration;

use thiserror::Error;

/// Errors that can occur while producing a completion.
#[derive(Debug, Error)]
pub enum GenerationError {
    /// The generator is temporarily unavailable.
    #[error("generator unavailable: {0}")]
    Unavailable(String),

    /// The request could not be delivered.
    #[error("network error: {0}")]
    Network(String),

    /// The generator is misconfigured (missing key, bad URL, ...).
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The generator rejected or failed to process the prompt.
    #[error("processing failed: {0}")]
    ProcessingFailed(String),

    /// The generator answered with nothing usable.
    #[error("generator returned an empty reply")]
    EmptyReply,

    /// No reply arrived within the configured bound.
    #[error("generation timed out after {0:?}")]
    Timeout(Duration),
}

/// Errors that can occur while resolving the current user.
#[derive(Debug, Error)]
pub enum IdentityError {
    /// Nobody is signed in.
    #[error("no authenticated user")]
    Unauthenticated,

    /// The identity provider could not be reached.
    #[error("identity provider unavailable: {0}")]
    Unavailable(String),
}
