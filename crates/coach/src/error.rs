//! Error types for coach operations.

use std::fmt;

use coach_core::{GenerationError, IdentityError};
use database::DatabaseError;
use thiserror::Error;

use crate::store::EntityKind;

/// Errors raised by an [`EntityStore`](crate::EntityStore).
#[derive(Debug, Error)]
pub enum StoreError {
    /// SQLite backend failure.
    #[error("database error: {0}")]
    Database(#[from] DatabaseError),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// Record not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: EntityKind, id: String },

    /// A stored record could not be decoded.
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

/// Errors that end a coach exchange or session setup.
#[derive(Debug, Error)]
pub enum CoachError {
    /// The signed-in user could not be resolved.
    #[error("identity lookup failed: {0}")]
    Identity(#[from] IdentityError),

    /// The active conversation could not be loaded.
    #[error("conversation load failed: {0}")]
    Load(#[source] StoreError),

    /// One of the health context reads failed.
    #[error("health context aggregation failed: {0}")]
    Aggregation(#[source] StoreError),

    /// The text generator failed, timed out, or returned nothing.
    #[error("text generation failed: {0}")]
    Generation(#[from] GenerationError),

    /// The exchange could not be written after a successful generation.
    #[error("conversation persistence failed: {0}")]
    Persistence(#[source] StoreError),
}

impl CoachError {
    /// The failure category, for state reporting.
    pub fn kind(&self) -> FailureKind {
        match self {
            CoachError::Identity(_) => FailureKind::Identity,
            CoachError::Load(_) => FailureKind::Load,
            CoachError::Aggregation(_) => FailureKind::Aggregation,
            CoachError::Generation(_) => FailureKind::Generation,
            CoachError::Persistence(_) => FailureKind::Persistence,
        }
    }
}

/// Category of a failed exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    Identity,
    Load,
    Aggregation,
    Generation,
    Persistence,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FailureKind::Identity => "identity",
            FailureKind::Load => "load",
            FailureKind::Aggregation => "aggregation",
            FailureKind::Generation => "generation",
            FailureKind::Persistence => "persistence",
        };
        f.write_str(name)
    }
}
