//! Session observer trait and implementations.

use async_trait::async_trait;
use coach_core::Conversation;

use crate::session::SessionState;

/// Notified as a chat session moves between states.
///
/// Abstracted so a view layer (terminal, tests, ...) can render the typing
/// indicator and refreshed history without polling.
#[async_trait]
pub trait SessionObserver: Send + Sync {
    /// The session entered `state`.
    async fn state_changed(&self, owner: &str, state: &SessionState);

    /// The active conversation was replaced by a freshly persisted copy.
    async fn conversation_updated(&self, owner: &str, conversation: &Conversation) {
        let _ = (owner, conversation);
    }
}

/// An observer that ignores every notification.
#[derive(Debug, Clone, Default)]
pub struct NoOpObserver;

#[async_trait]
impl SessionObserver for NoOpObserver {
    async fn state_changed(&self, _owner: &str, _state: &SessionState) {}
}

/// An observer that logs every notification.
#[derive(Debug, Clone, Default)]
pub struct LoggingObserver;

#[async_trait]
impl SessionObserver for LoggingObserver {
    async fn state_changed(&self, owner: &str, state: &SessionState) {
        match state {
            SessionState::Sending => tracing::info!("[{}] Typing started", owner),
            SessionState::Idle => tracing::info!("[{}] Typing stopped", owner),
            SessionState::Failed { kind, message } => {
                tracing::warn!("[{}] Exchange failed ({}): {}", owner, kind, message)
            }
        }
    }

    async fn conversation_updated(&self, owner: &str, conversation: &Conversation) {
        tracing::info!(
            "[{}] Conversation {} now has {} turns",
            owner,
            conversation.id,
            conversation.turn_count()
        );
    }
}
