//! In-memory [`EntityStore`] for tests and demos.
//!
//! Records live in insertion order; "newest first" reads walk the lists
//! backwards. Failures can be injected per entity kind.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use chrono::{NaiveDate, SecondsFormat, Utc};
use coach_core::{Conversation, ConversationTurn};
use database::validation::{mood_score, validate_scale};
use database::{
    DatabaseError, HealthMetric, MealLog, MoodEntry, NewHealthMetric, NewMealLog, NewMoodEntry,
    NewWorkoutLog, ProfileUpdate, UserProfile, WorkoutLog,
};
use tokio::sync::RwLock;

use crate::error::StoreError;
use crate::store::{EntityKind, EntityStore, NewConversation, StoreResult};

#[derive(Debug, Default)]
struct Tables {
    profiles: HashMap<String, UserProfile>,
    metrics: Vec<HealthMetric>,
    moods: Vec<MoodEntry>,
    workouts: Vec<WorkoutLog>,
    meals: Vec<MealLog>,
    conversations: Vec<Conversation>,
}

#[derive(Debug, Default)]
struct Faults {
    failing_reads: HashSet<EntityKind>,
    conversation_write_failures: u32,
}

/// Entity store holding everything in process memory.
#[derive(Debug, Default)]
pub struct InMemoryEntityStore {
    tables: RwLock<Tables>,
    faults: RwLock<Faults>,
}

fn now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

fn validation(err: database::ValidationError) -> StoreError {
    StoreError::Database(DatabaseError::from(err))
}

impl InMemoryEntityStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a health metric.
    pub async fn add_health_metric(&self, owner: &str, metric: NewHealthMetric) -> HealthMetric {
        let record = HealthMetric {
            id: new_id(),
            owner: owner.to_string(),
            date: metric.date.to_string(),
            steps: metric.steps,
            sleep_hours: metric.sleep_hours,
            sleep_quality: metric.sleep_quality,
            water_intake: metric.water_intake,
            created_at: now(),
        };
        self.tables.write().await.metrics.push(record.clone());
        record
    }

    /// Record a mood entry. The score is derived from the label.
    pub async fn add_mood(&self, owner: &str, entry: NewMoodEntry) -> StoreResult<MoodEntry> {
        let score = mood_score(&entry.mood_label).map_err(validation)?;
        let levels = [
            ("stress_level", entry.stress_level),
            ("energy_level", entry.energy_level),
        ];
        for (field, level) in levels {
            if let Some(level) = level {
                validate_scale(field, level).map_err(validation)?;
            }
        }

        let record = MoodEntry {
            id: new_id(),
            owner: owner.to_string(),
            mood_label: entry.mood_label,
            mood_score: score,
            energy_level: entry.energy_level,
            stress_level: entry.stress_level,
            journal_entry: entry.journal_entry,
            created_at: now(),
        };
        self.tables.write().await.moods.push(record.clone());
        Ok(record)
    }

    /// Record a workout.
    pub async fn add_workout(&self, owner: &str, log: NewWorkoutLog) -> WorkoutLog {
        let record = WorkoutLog {
            id: new_id(),
            owner: owner.to_string(),
            name: log.name,
            duration_minutes: log.duration_minutes,
            calories_burned: log.calories_burned,
            created_at: now(),
        };
        self.tables.write().await.workouts.push(record.clone());
        record
    }

    /// Record a meal.
    pub async fn add_meal(&self, owner: &str, meal: NewMealLog) -> MealLog {
        let record = MealLog {
            id: new_id(),
            owner: owner.to_string(),
            date: meal.date.to_string(),
            name: meal.name,
            calories: meal.calories,
            protein: meal.protein,
            carbs: meal.carbs,
            fat: meal.fat,
            created_at: now(),
        };
        self.tables.write().await.meals.push(record.clone());
        record
    }

    /// Replace a user's profile.
    pub async fn set_profile(&self, owner: &str, update: ProfileUpdate) -> UserProfile {
        let stamp = now();
        let profile = UserProfile {
            owner: owner.to_string(),
            goal: update.goal,
            activity_level: update.activity_level,
            daily_steps_goal: update.daily_steps_goal,
            daily_calorie_goal: update.daily_calorie_goal,
            daily_water_goal: update.daily_water_goal,
            sleep_goal_hours: update.sleep_goal_hours,
            created_at: stamp.clone(),
            updated_at: stamp,
        };
        self.tables
            .write()
            .await
            .profiles
            .insert(owner.to_string(), profile.clone());
        profile
    }

    /// Make every read of `kind` fail with [`StoreError::Unavailable`].
    pub async fn fail_reads_of(&self, kind: EntityKind) {
        self.faults.write().await.failing_reads.insert(kind);
    }

    /// Make the next `times` conversation writes fail.
    pub async fn fail_conversation_writes(&self, times: u32) {
        self.faults.write().await.conversation_write_failures = times;
    }

    /// Clear all injected failures.
    pub async fn heal(&self) {
        *self.faults.write().await = Faults::default();
    }

    /// Drop a conversation, as an external account cleanup would.
    pub async fn remove_conversation(&self, id: &str) -> bool {
        let mut tables = self.tables.write().await;
        let before = tables.conversations.len();
        tables.conversations.retain(|c| c.id != id);
        tables.conversations.len() < before
    }

    /// Number of conversations stored for `owner`.
    pub async fn conversation_count(&self, owner: &str) -> usize {
        self.tables
            .read()
            .await
            .conversations
            .iter()
            .filter(|c| c.owner == owner)
            .count()
    }

    async fn check_read(&self, kind: EntityKind) -> StoreResult<()> {
        if self.faults.read().await.failing_reads.contains(&kind) {
            return Err(StoreError::Unavailable(format!("{kind} reads disabled")));
        }
        Ok(())
    }

    async fn check_conversation_write(&self) -> StoreResult<()> {
        let mut faults = self.faults.write().await;
        if faults.conversation_write_failures > 0 {
            faults.conversation_write_failures -= 1;
            return Err(StoreError::Unavailable("conversation writes disabled".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EntityStore for InMemoryEntityStore {
    async fn health_metric_on(
        &self,
        owner: &str,
        date: NaiveDate,
    ) -> StoreResult<Option<HealthMetric>> {
        self.check_read(EntityKind::HealthMetric).await?;
        let date = date.to_string();
        let tables = self.tables.read().await;
        Ok(tables
            .metrics
            .iter()
            .rev()
            .find(|m| m.owner == owner && m.date == date)
            .cloned())
    }

    async fn recent_moods(&self, owner: &str, limit: usize) -> StoreResult<Vec<MoodEntry>> {
        self.check_read(EntityKind::MoodEntry).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .moods
            .iter()
            .rev()
            .filter(|m| m.owner == owner)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn recent_workouts(&self, owner: &str, limit: usize) -> StoreResult<Vec<WorkoutLog>> {
        self.check_read(EntityKind::WorkoutLog).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .workouts
            .iter()
            .rev()
            .filter(|w| w.owner == owner)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn meals_on(&self, owner: &str, date: NaiveDate) -> StoreResult<Vec<MealLog>> {
        self.check_read(EntityKind::MealLog).await?;
        let date = date.to_string();
        let tables = self.tables.read().await;
        Ok(tables
            .meals
            .iter()
            .filter(|m| m.owner == owner && m.date == date)
            .cloned()
            .collect())
    }

    async fn user_profile(&self, owner: &str) -> StoreResult<Option<UserProfile>> {
        self.check_read(EntityKind::UserProfile).await?;
        Ok(self.tables.read().await.profiles.get(owner).cloned())
    }

    async fn latest_conversation(&self, owner: &str) -> StoreResult<Option<Conversation>> {
        self.check_read(EntityKind::Conversation).await?;
        let tables = self.tables.read().await;
        Ok(tables
            .conversations
            .iter()
            .rev()
            .find(|c| c.owner == owner)
            .cloned())
    }

    async fn create_conversation(
        &self,
        owner: &str,
        draft: NewConversation,
    ) -> StoreResult<Conversation> {
        self.check_conversation_write().await?;
        let conversation = Conversation {
            id: new_id(),
            owner: owner.to_string(),
            title: draft.title,
            messages: draft.messages,
            context_summary: draft.context_summary,
            created_at: Utc::now(),
        };
        self.tables
            .write()
            .await
            .conversations
            .push(conversation.clone());
        Ok(conversation)
    }

    async fn update_conversation(
        &self,
        id: &str,
        messages: &[ConversationTurn],
        context_summary: &str,
    ) -> StoreResult<Conversation> {
        self.check_conversation_write().await?;
        let mut tables = self.tables.write().await;
        let conversation = tables
            .conversations
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| StoreError::NotFound {
                entity: EntityKind::Conversation,
                id: id.to_string(),
            })?;
        conversation.messages = messages.to_vec();
        conversation.context_summary = context_summary.to_string();
        Ok(conversation.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[tokio::test]
    async fn test_recent_reads_are_newest_first_and_limited() {
        let store = InMemoryEntityStore::new();
        for label in ["bad", "okay", "good", "great"] {
            store.add_mood("u1", NewMoodEntry::new(label)).await.unwrap();
        }
        store.add_mood("u2", NewMoodEntry::new("terrible")).await.unwrap();

        let moods = store.recent_moods("u1", 3).await.unwrap();
        let labels: Vec<_> = moods.iter().map(|m| m.mood_label.as_str()).collect();
        assert_eq!(labels, vec!["great", "good", "okay"]);
        assert_eq!(moods[0].mood_score, 1);
    }

    #[tokio::test]
    async fn test_add_mood_validates() {
        let store = InMemoryEntityStore::new();

        assert!(store.add_mood("u1", NewMoodEntry::new("meh")).await.is_err());
        assert!(store
            .add_mood("u1", NewMoodEntry::new("good").with_stress_level(9))
            .await
            .is_err());
        assert!(store.recent_moods("u1", 3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_latest_metric_wins_for_date() {
        let store = InMemoryEntityStore::new();
        store
            .add_health_metric("u1", NewHealthMetric::on(day()).with_steps(1000))
            .await;
        store
            .add_health_metric("u1", NewHealthMetric::on(day()).with_steps(6000))
            .await;

        let metric = store.health_metric_on("u1", day()).await.unwrap().unwrap();
        assert_eq!(metric.steps, Some(6000));
        assert!(store
            .health_metric_on("u1", day().pred_opt().unwrap())
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_injected_read_failure() {
        let store = InMemoryEntityStore::new();
        store.fail_reads_of(EntityKind::MealLog).await;

        assert!(matches!(
            store.meals_on("u1", day()).await,
            Err(StoreError::Unavailable(_))
        ));
        assert!(store.recent_workouts("u1", 7).await.is_ok());

        store.heal().await;
        assert!(store.meals_on("u1", day()).await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_write_failures_are_consumed() {
        let store = InMemoryEntityStore::new();
        store.fail_conversation_writes(1).await;

        let draft = NewConversation {
            title: "Chat Oct 19".to_string(),
            messages: vec![ConversationTurn::user("hi")],
            context_summary: String::new(),
        };
        assert!(store.create_conversation("u1", draft.clone()).await.is_err());
        assert_eq!(store.conversation_count("u1").await, 0);

        let created = store.create_conversation("u1", draft).await.unwrap();
        assert_eq!(store.conversation_count("u1").await, 1);

        let missing = store.update_conversation("nope", &[], "").await;
        assert!(matches!(missing, Err(StoreError::NotFound { .. })));

        let updated = store
            .update_conversation(&created.id, &[], "ctx")
            .await
            .unwrap();
        assert!(updated.is_empty());
        assert_eq!(updated.context_summary, "ctx");
    }
}
