//! The single active conversation per user.

use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::{Conversation, ConversationTurn};
use tracing::{info, warn};

use crate::error::{CoachError, StoreError};
use crate::store::{EntityStore, NewConversation};

/// Title for a conversation started on `date` (e.g. `Chat Oct 19`).
pub fn conversation_title(date: NaiveDate) -> String {
    format!("Chat {}", date.format("%b %-d"))
}

/// Loads and grows a user's active conversation.
///
/// Turns are only ever persisted in user/assistant pairs, and every write
/// replaces the stored message list wholesale. Concurrent writers are not
/// merged; the last write wins.
#[derive(Clone)]
pub struct ConversationStore {
    store: Arc<dyn EntityStore>,
    persist_retries: u32,
}

impl ConversationStore {
    pub fn new(store: Arc<dyn EntityStore>, persist_retries: u32) -> Self {
        Self {
            store,
            persist_retries,
        }
    }

    /// The most recently created conversation for `owner`.
    pub async fn load(&self, owner: &str) -> Result<Option<Conversation>, StoreError> {
        self.store.latest_conversation(owner).await
    }

    /// Persist one exchange.
    ///
    /// Creates the conversation (titled from `started_on`) when `conversation`
    /// is `None`, otherwise appends both turns to it. If the conversation has
    /// been deleted from the store in the meantime, a fresh one holding only
    /// this exchange is created instead.
    pub async fn append_exchange(
        &self,
        owner: &str,
        conversation: Option<&Conversation>,
        user_message: &str,
        assistant_reply: &str,
        context_summary: &str,
        started_on: NaiveDate,
    ) -> Result<Conversation, CoachError> {
        let exchange = [
            ConversationTurn::user(user_message),
            ConversationTurn::assistant(assistant_reply),
        ];

        let mut target = conversation;
        let mut attempt = 0;
        loop {
            let result = match target {
                None => {
                    let draft = NewConversation {
                        title: conversation_title(started_on),
                        messages: exchange.to_vec(),
                        context_summary: context_summary.to_string(),
                    };
                    self.store.create_conversation(owner, draft).await
                }
                Some(existing) => {
                    let mut messages = Vec::with_capacity(existing.messages.len() + 2);
                    messages.extend_from_slice(&existing.messages);
                    messages.extend_from_slice(&exchange);
                    self.store
                        .update_conversation(&existing.id, &messages, context_summary)
                        .await
                }
            };

            match result {
                Ok(saved) => {
                    info!(
                        "Persisted exchange to conversation {} ({} turns)",
                        saved.id,
                        saved.turn_count()
                    );
                    return Ok(saved);
                }
                Err(StoreError::NotFound { id, .. }) if target.is_some() => {
                    warn!(
                        "Conversation {} for {} no longer exists, starting a new one",
                        id, owner
                    );
                    target = None;
                }
                Err(e) if attempt < self.persist_retries => {
                    attempt += 1;
                    warn!(
                        "Persisting exchange for {} failed (attempt {}): {}",
                        owner, attempt, e
                    );
                }
                Err(e) => return Err(CoachError::Persistence(e)),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FailureKind;
    use crate::memory_store::InMemoryEntityStore;
    use coach_core::Role;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_title_format() {
        assert_eq!(conversation_title(day()), "Chat Oct 19");
        assert_eq!(
            conversation_title(NaiveDate::from_ymd_opt(2026, 3, 4).unwrap()),
            "Chat Mar 4"
        );
    }

    #[tokio::test]
    async fn test_first_exchange_creates_conversation() {
        let store = Arc::new(InMemoryEntityStore::new());
        let conversations = ConversationStore::new(store.clone(), 0);

        assert!(conversations.load("u1").await.unwrap().is_none());

        let saved = conversations
            .append_exchange("u1", None, "Hi", "Hello!", "ctx", day())
            .await
            .unwrap();
        assert_eq!(saved.title, "Chat Oct 19");
        assert_eq!(saved.turn_count(), 2);
        assert_eq!(saved.messages[0].role, Role::User);
        assert_eq!(saved.messages[1].role, Role::Assistant);
        assert_eq!(saved.context_summary, "ctx");

        let loaded = conversations.load("u1").await.unwrap().unwrap();
        assert_eq!(loaded, saved);
    }

    #[tokio::test]
    async fn test_append_grows_by_two_without_reordering() {
        let store = Arc::new(InMemoryEntityStore::new());
        let conversations = ConversationStore::new(store.clone(), 0);

        let mut current = conversations
            .append_exchange("u1", None, "m0", "r0", "ctx", day())
            .await
            .unwrap();
        for i in 1..4 {
            let before = current.messages.clone();
            let next = conversations
                .append_exchange(
                    "u1",
                    Some(&current),
                    &format!("m{i}"),
                    &format!("r{i}"),
                    "ctx",
                    day(),
                )
                .await
                .unwrap();
            assert_eq!(next.turn_count(), before.len() + 2);
            assert_eq!(&next.messages[..before.len()], before.as_slice());
            assert_eq!(next.id, current.id);
            current = next;
        }
        assert_eq!(store.conversation_count("u1").await, 1);
    }

    #[tokio::test]
    async fn test_one_retry_recovers_a_failed_write() {
        let store = Arc::new(InMemoryEntityStore::new());
        store.fail_conversation_writes(1).await;
        let conversations = ConversationStore::new(store.clone(), 1);

        let saved = conversations
            .append_exchange("u1", None, "Hi", "Hello!", "ctx", day())
            .await
            .unwrap();
        assert_eq!(saved.turn_count(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_persistence_failure() {
        let store = Arc::new(InMemoryEntityStore::new());
        store.fail_conversation_writes(2).await;
        let conversations = ConversationStore::new(store.clone(), 1);

        let err = conversations
            .append_exchange("u1", None, "Hi", "Hello!", "ctx", day())
            .await
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::Persistence);
        assert_eq!(store.conversation_count("u1").await, 0);
    }

    #[tokio::test]
    async fn test_deleted_conversation_is_replaced_with_a_fresh_one() {
        let store = Arc::new(InMemoryEntityStore::new());
        let conversations = ConversationStore::new(store.clone(), 0);

        let stale = conversations
            .append_exchange("u1", None, "Hi", "Hello!", "ctx", day())
            .await
            .unwrap();
        assert!(store.remove_conversation(&stale.id).await);

        let saved = conversations
            .append_exchange("u1", Some(&stale), "Again", "Welcome back!", "ctx", day())
            .await
            .unwrap();
        assert_ne!(saved.id, stale.id);
        assert_eq!(saved.turn_count(), 2);
        assert_eq!(saved.messages[0].content, "Again");
        assert_eq!(store.conversation_count("u1").await, 1);
    }
}
