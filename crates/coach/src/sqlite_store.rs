//! [`EntityStore`] backed by the SQLite `database` crate.

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, SecondsFormat, Utc};
use coach_core::{Conversation, ConversationTurn, Role};
use database::{
    conversation, health_metric, meal_log, mood_entry, user_profile, workout_log,
    ConversationRecord, Database, DatabaseError, HealthMetric, MealLog, MoodEntry, StoredTurn,
    UserProfile, WorkoutLog,
};

use crate::error::StoreError;
use crate::store::{EntityKind, EntityStore, NewConversation, StoreResult};

/// Entity store over a migrated SQLite database.
#[derive(Debug, Clone)]
pub struct SqliteEntityStore {
    db: Database,
}

impl SqliteEntityStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Connect to `url` and run migrations.
    pub async fn open(url: &str) -> StoreResult<Self> {
        let db = Database::connect(url).await?;
        db.migrate().await?;
        Ok(Self::new(db))
    }

    /// The underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }
}

#[async_trait]
impl EntityStore for SqliteEntityStore {
    async fn health_metric_on(
        &self,
        owner: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<HealthMetric>> {
        Ok(health_metric::get_for_date(self.db.pool(), owner, date).await?)
    }

    async fn recent_moods(&self, owner: &str, limit: usize) -> StoreResult<Vec<MoodEntry>> {
        Ok(mood_entry::list_recent(self.db.pool(), owner, limit).await?)
    }

    async fn recent_workouts(&self, owner: &str, limit: usize) -> StoreResult<Vec<WorkoutLog>> {
        Ok(workout_log::list_recent(self.db.pool(), owner, limit).await?)
    }

    async fn meals_on(&self, owner: &str, date: NaiveDate) -> StoreResult<Vec<MealLog>> {
        Ok(meal_log::list_for_date(self.db.pool(), owner, date).await?)
    }

    async fn user_profile(&self, owner: &str) -> StoreResult<Option<UserProfile>> {
        Ok(user_profile::get_profile(self.db.pool(), owner).await?)
    }

    async fn latest_conversation(&self, owner: &str) -> StoreResult<Option<Conversation>> {
        conversation::latest_for_owner(self.db.pool(), owner)
            .await?
            .map(conversation_from_record)
            .transpose()
    }

    async fn create_conversation(
        &self,
        owner: &str,
        draft: NewConversation,
    ) -> StoreResult<Conversation> {
        let messages: Vec<StoredTurn> = draft.messages.iter().map(stored_turn).collect();
        let record = conversation::create_conversation(
            self.db.pool(),
            owner,
            &draft.title,
            &messages,
            &draft.context_summary,
        )
        .await?;
        conversation_from_record(record)
    }

    async fn update_conversation(
        &self,
        id: &str,
        messages: &[ConversationTurn],
        context_summary: &str,
    ) -> StoreResult<Conversation> {
        let messages: Vec<StoredTurn> = messages.iter().map(stored_turn).collect();
        let record =
            conversation::update_conversation(self.db.pool(), id, &messages, context_summary)
                .await
                .map_err(|err| match err {
                    DatabaseError::NotFound { id, .. } => StoreError::NotFound {
                        entity: EntityKind::Conversation,
                        id,
                    },
                    other => StoreError::Database(other),
                })?;
        conversation_from_record(record)
    }
}

fn stored_turn(turn: &ConversationTurn) -> StoredTurn {
    StoredTurn {
        role: turn.role.as_str().to_string(),
        content: turn.content.clone(),
        timestamp: turn.timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn parse_timestamp(value: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|err| StoreError::Corrupt(format!("bad timestamp {value:?}: {err}")))
}

fn conversation_turn(turn: StoredTurn) -> StoreResult<ConversationTurn> {
    let role = Role::parse(&turn.role)
        .ok_or_else(|| StoreError::Corrupt(format!("unknown role {:?}", turn.role)))?;
    let timestamp = parse_timestamp(&turn.timestamp)?;
    Ok(ConversationTurn::at(role, turn.content, timestamp))
}

fn conversation_from_record(record: ConversationRecord) -> StoreResult<Conversation> {
    let messages = record
        .messages
        .0
        .into_iter()
        .map(conversation_turn)
        .collect::<StoreResult<Vec<_>>>()?;

    Ok(Conversation {
        created_at: parse_timestamp(&record.created_at)?,
        id: record.id,
        owner: record.owner,
        title: record.title,
        messages,
        context_summary: record.context_summary,
    })
}
