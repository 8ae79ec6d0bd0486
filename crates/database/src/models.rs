//! Database models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// Personal goals and targets for a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UserProfile {
    /// Owning user id.
    pub owner: String,
    /// Primary wellness goal (e.g., "lose_weight", "better_sleep").
    pub goal: Option<String>,
    /// Activity level (e.g., "sedentary", "very_active").
    pub activity_level: Option<String>,
    pub daily_steps_goal: Option<i64>,
    pub daily_calorie_goal: Option<i64>,
    /// Daily water goal in millilitres.
    pub daily_water_goal: Option<i64>,
    pub sleep_goal_hours: Option<f64>,
    pub created_at: String,
    pub updated_at: String,
}

/// Fields written by a profile upsert. `None` leaves the column empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfileUpdate {
    pub goal: Option<String>,
    pub activity_level: Option<String>,
    pub daily_steps_goal: Option<i64>,
    pub daily_calorie_goal: Option<i64>,
    pub daily_water_goal: Option<i64>,
    pub sleep_goal_hours: Option<f64>,
}

/// Daily health measurements for one calendar date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HealthMetric {
    pub id: String,
    pub owner: String,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub steps: Option<i64>,
    pub sleep_hours: Option<f64>,
    /// Free-form quality label (e.g., "good", "poor").
    pub sleep_quality: Option<String>,
    /// Water intake in millilitres.
    pub water_intake: Option<i64>,
    pub created_at: String,
}

/// Input for a new health metric row.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHealthMetric {
    pub date: NaiveDate,
    pub steps: Option<i64>,
    pub sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    pub water_intake: Option<i64>,
}

impl NewHealthMetric {
    /// An empty metric for `date`.
    pub fn on(date: NaiveDate) -> Self {
        Self {
            date,
            steps: None,
            sleep_hours: None,
            sleep_quality: None,
            water_intake: None,
        }
    }

    pub fn with_steps(mut self, steps: i64) -> Self {
        self.steps = Some(steps);
        self
    }

    pub fn with_sleep(mut self, hours: f64, quality: impl Into<String>) -> Self {
        self.sleep_hours = Some(hours);
        self.sleep_quality = Some(quality.into());
        self
    }

    pub fn with_water_intake(mut self, millilitres: i64) -> Self {
        self.water_intake = Some(millilitres);
        self
    }
}

/// A logged mood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct MoodEntry {
    pub id: String,
    pub owner: String,
    /// One of "great", "good", "okay", "bad", "terrible".
    pub mood_label: String,
    /// Ordinal of the label (1 = great ... 5 = terrible).
    pub mood_score: i64,
    /// 1-5.
    pub energy_level: Option<i64>,
    /// 1-5.
    pub stress_level: Option<i64>,
    pub journal_entry: Option<String>,
    pub created_at: String,
}

/// Input for a new mood entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMoodEntry {
    pub mood_label: String,
    pub energy_level: Option<i64>,
    pub stress_level: Option<i64>,
    pub journal_entry: Option<String>,
}

impl NewMoodEntry {
    pub fn new(mood_label: impl Into<String>) -> Self {
        Self {
            mood_label: mood_label.into(),
            energy_level: None,
            stress_level: None,
            journal_entry: None,
        }
    }

    pub fn with_stress_level(mut self, level: i64) -> Self {
        self.stress_level = Some(level);
        self
    }

    pub fn with_energy_level(mut self, level: i64) -> Self {
        self.energy_level = Some(level);
        self
    }

    pub fn with_journal(mut self, entry: impl Into<String>) -> Self {
        self.journal_entry = Some(entry.into());
        self
    }
}

/// A completed workout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct WorkoutLog {
    pub id: String,
    pub owner: String,
    pub name: String,
    pub duration_minutes: Option<i64>,
    pub calories_burned: Option<i64>,
    pub created_at: String,
}

/// Input for a new workout log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewWorkoutLog {
    pub name: String,
    pub duration_minutes: Option<i64>,
    pub calories_burned: Option<i64>,
}

impl NewWorkoutLog {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            duration_minutes: None,
            calories_burned: None,
        }
    }

    pub fn with_duration(mut self, minutes: i64) -> Self {
        self.duration_minutes = Some(minutes);
        self
    }
}

/// A logged meal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MealLog {
    pub id: String,
    pub owner: String,
    /// Calendar date (`YYYY-MM-DD`).
    pub date: String,
    pub name: String,
    pub calories: Option<i64>,
    /// Grams.
    pub protein: Option<f64>,
    /// Grams.
    pub carbs: Option<f64>,
    /// Grams.
    pub fat: Option<f64>,
    pub created_at: String,
}

/// Input for a new meal log.
#[derive(Debug, Clone, PartialEq)]
pub struct NewMealLog {
    pub date: NaiveDate,
    pub name: String,
    pub calories: Option<i64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fat: Option<f64>,
}

impl NewMealLog {
    pub fn new(date: NaiveDate, name: impl Into<String>) -> Self {
        Self {
            date,
            name: name.into(),
            calories: None,
            protein: None,
            carbs: None,
            fat: None,
        }
    }

    pub fn with_calories(mut self, calories: i64) -> Self {
        self.calories = Some(calories);
        self
    }

    pub fn with_macros(mut self, protein: f64, carbs: f64, fat: f64) -> Self {
        self.protein = Some(protein);
        self.carbs = Some(carbs);
        self.fat = Some(fat);
        self
    }
}

/// One turn as stored inside a conversation's JSON `messages` column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredTurn {
    /// "user" or "assistant".
    pub role: String,
    pub content: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
}

/// A persisted coach conversation.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct ConversationRecord {
    pub id: String,
    pub owner: String,
    pub title: String,
    /// Full ordered message list.
    pub messages: Json<Vec<StoredTurn>>,
    /// Health context rendered for the latest exchange.
    pub context_summary: String,
    pub created_at: String,
    pub updated_at: String,
}
