//! The entity store contract the coach reads health records from and writes
//! conversations to.

use std::fmt;

use async_trait::async_trait;
use chrono::NaiveDate;
use coach_core::{Conversation, ConversationTurn};
use database::{HealthMetric, MealLog, MoodEntry, UserProfile, WorkoutLog};

use crate::error::StoreError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// The kinds of records the store holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    HealthMetric,
    MoodEntry,
    WorkoutLog,
    MealLog,
    UserProfile,
    Conversation,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::HealthMetric => "health metric",
            EntityKind::MoodEntry => "mood entry",
            EntityKind::WorkoutLog => "workout log",
            EntityKind::MealLog => "meal log",
            EntityKind::UserProfile => "user profile",
            EntityKind::Conversation => "conversation",
        };
        f.write_str(name)
    }
}

/// Fields for a conversation that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewConversation {
    pub title: String,
    pub messages: Vec<ConversationTurn>,
    pub context_summary: String,
}

/// Typed access to persisted records, scoped by owner.
///
/// Reads never treat "nothing found" as an error: absent records come back
/// as `None` or an empty list.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// The metric row for `date`, if one was recorded.
    async fn health_metric_on(
        &self,
        owner: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<HealthMetric>>;

    /// Up to `limit` mood entries, newest first.
    async fn recent_moods(&self, owner: &str, limit: usize) -> StoreResult<Vec<MoodEntry>>;

    /// Up to `limit` workout logs, newest first.
    async fn recent_workouts(&self, owner: &str, limit: usize) -> StoreResult<Vec<WorkoutLog>>;

    /// Every meal logged on `date`.
    async fn meals_on(&self, owner: &str, date: NaiveDate) -> StoreResult<Vec<MealLog>>;

    async fn user_profile(&self, owner: &str) -> StoreResult<Option<UserProfile>>;

    /// The most recently created conversation.
    async fn latest_conversation(&self, owner: &str) -> StoreResult<Option<Conversation>>;

    /// Persist a new conversation; the store assigns its id.
    async fn create_conversation(
        &self,
        owner: &str,
        draft: NewConversation,
    ) -> StoreResult<Conversation>;

    /// Replace a conversation's messages and context summary wholesale.
    async fn update_conversation(
        &self,
        id: &str,
        messages: &[ConversationTurn],
        context_summary: &str,
    ) -> StoreResult<Conversation>;
}
