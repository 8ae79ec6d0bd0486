//! The health context snapshot and its rendered prompt block.

use database::{HealthMetric, MealLog, MoodEntry, UserProfile, WorkoutLog};

/// Placeholder for metrics with no record today.
pub const NOT_TRACKED: &str = "Not tracked";
/// Placeholder for mood and stress with no entries.
pub const NOT_LOGGED: &str = "Not logged";
/// Placeholder for a missing sleep quality.
pub const UNKNOWN_QUALITY: &str = "unknown";
/// Placeholder for a missing goal.
pub const DEFAULT_GOAL: &str = "General wellness";
/// Placeholder for a missing display name.
pub const DEFAULT_USER_NAME: &str = "User";

/// Raw read results the snapshot is reduced from.
#[derive(Debug, Clone, Default)]
pub struct ContextSources {
    pub metric: Option<HealthMetric>,
    /// Newest first.
    pub moods: Vec<MoodEntry>,
    /// Newest first.
    pub workouts: Vec<WorkoutLog>,
    pub meals: Vec<MealLog>,
    pub profile: Option<UserProfile>,
}

/// Point-in-time summary of a user's health signals.
///
/// Every field has a default; a snapshot can always be built, whatever
/// the sources returned.
#[derive(Debug, Clone, PartialEq)]
pub struct HealthContextSnapshot {
    pub user_name: String,
    pub goal: Option<String>,
    pub today_steps: Option<i64>,
    pub today_sleep_hours: Option<f64>,
    pub sleep_quality: Option<String>,
    /// Sum over today's meals; meals without calories count as zero.
    pub today_calories_consumed: i64,
    pub recent_mood: Option<String>,
    pub recent_stress_level: Option<i64>,
    pub workouts_this_week_count: usize,
}

impl HealthContextSnapshot {
    /// A snapshot with nothing but a name.
    pub fn empty(user_name: impl Into<String>) -> Self {
        Self {
            user_name: user_name.into(),
            goal: None,
            today_steps: None,
            today_sleep_hours: None,
            sleep_quality: None,
            today_calories_consumed: 0,
            recent_mood: None,
            recent_stress_level: None,
            workouts_this_week_count: 0,
        }
    }

    /// Reduce read results into a snapshot.
    pub fn reduce(user_name: impl Into<String>, sources: ContextSources) -> Self {
        let ContextSources {
            metric,
            moods,
            workouts,
            meals,
            profile,
        } = sources;

        let latest_mood = moods.into_iter().next();
        let (today_steps, today_sleep_hours, sleep_quality) = match metric {
            Some(m) => (m.steps, m.sleep_hours, m.sleep_quality),
            None => (None, None, None),
        };

        Self {
            user_name: user_name.into(),
            goal: profile.and_then(|p| p.goal),
            today_steps,
            today_sleep_hours,
            sleep_quality,
            today_calories_consumed: meals.iter().filter_map(|m| m.calories).sum(),
            recent_stress_level: latest_mood.as_ref().and_then(|m| m.stress_level),
            recent_mood: latest_mood.map(|m| m.mood_label),
            workouts_this_week_count: workouts.len(),
        }
    }

    /// Render the `User Health Context:` block, one line per field.
    pub fn render(&self) -> String {
        let name = if self.user_name.trim().is_empty() {
            DEFAULT_USER_NAME
        } else {
            self.user_name.as_str()
        };
        let goal = self
            .goal
            .as_deref()
            .filter(|g| !g.is_empty())
            .map(|g| g.replace('_', " "))
            .unwrap_or_else(|| DEFAULT_GOAL.to_string());

        let lines = [
            "User Health Context:".to_string(),
            format!("- Name: {name}"),
            format!("- Goal: {goal}"),
            format!("- Today's steps: {}", or_placeholder(self.today_steps, NOT_TRACKED)),
            format!(
                "- Today's sleep: {} hours ({} quality)",
                or_placeholder(self.today_sleep_hours, NOT_TRACKED),
                self.sleep_quality.as_deref().unwrap_or(UNKNOWN_QUALITY)
            ),
            format!("- Today's calories consumed: {}", self.today_calories_consumed),
            format!(
                "- Recent mood: {}",
                self.recent_mood.as_deref().unwrap_or(NOT_LOGGED)
            ),
            format!("- Workouts this week: {}", self.workouts_this_week_count),
            format!(
                "- Stress level: {}/5",
                or_placeholder(self.recent_stress_level, NOT_LOGGED)
            ),
        ];
        lines.join("\n")
    }
}

fn or_placeholder<T: ToString>(value: Option<T>, placeholder: &str) -> String {
    value.map_or_else(|| placeholder.to_string(), |v| v.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meal(calories: Option<i64>) -> MealLog {
        MealLog {
            id: "m".to_string(),
            owner: "u1".to_string(),
            date: "2026-10-19".to_string(),
            name: "Meal".to_string(),
            calories,
            protein: None,
            carbs: None,
            fat: None,
            created_at: "2026-10-19T08:00:00.000Z".to_string(),
        }
    }

    fn mood(label: &str, stress: Option<i64>) -> MoodEntry {
        MoodEntry {
            id: label.to_string(),
            owner: "u1".to_string(),
            mood_label: label.to_string(),
            mood_score: 2,
            energy_level: None,
            stress_level: stress,
            journal_entry: None,
            created_at: "2026-10-19T08:00:00.000Z".to_string(),
        }
    }

    #[test]
    fn test_empty_sources_reduce_to_defaults() {
        let snapshot = HealthContextSnapshot::reduce("Maya", ContextSources::default());
        assert_eq!(snapshot, HealthContextSnapshot::empty("Maya"));
    }

    #[test]
    fn test_empty_snapshot_renders_placeholders() {
        let block = HealthContextSnapshot::empty("").render();

        assert_eq!(
            block,
            "User Health Context:\n\
             - Name: User\n\
             - Goal: General wellness\n\
             - Today's steps: Not tracked\n\
             - Today's sleep: Not tracked hours (unknown quality)\n\
             - Today's calories consumed: 0\n\
             - Recent mood: Not logged\n\
             - Workouts this week: 0\n\
             - Stress level: Not logged/5"
        );
        assert!(!block.contains("None"));
        assert!(!block.contains("null"));
    }

    #[test]
    fn test_reduce_takes_latest_mood_and_sums_calories() {
        let sources = ContextSources {
            moods: vec![mood("good", Some(2)), mood("bad", Some(4))],
            meals: vec![meal(Some(400)), meal(None), meal(Some(250))],
            ..Default::default()
        };

        let snapshot = HealthContextSnapshot::reduce("Maya", sources);
        assert_eq!(snapshot.recent_mood.as_deref(), Some("good"));
        assert_eq!(snapshot.recent_stress_level, Some(2));
        assert_eq!(snapshot.today_calories_consumed, 650);
    }

    #[test]
    fn test_render_filled_snapshot() {
        let snapshot = HealthContextSnapshot {
            user_name: "Maya Lopez".to_string(),
            goal: Some("better_sleep".to_string()),
            today_steps: Some(8432),
            today_sleep_hours: Some(7.5),
            sleep_quality: Some("good".to_string()),
            today_calories_consumed: 1200,
            recent_mood: Some("okay".to_string()),
            recent_stress_level: Some(3),
            workouts_this_week_count: 4,
        };

        let block = snapshot.render();
        assert!(block.contains("- Name: Maya Lopez"));
        assert!(block.contains("- Goal: better sleep"));
        assert!(block.contains("- Today's steps: 8432"));
        assert!(block.contains("- Today's sleep: 7.5 hours (good quality)"));
        assert!(block.contains("- Workouts this week: 4"));
        assert!(block.contains("- Stress level: 3/5"));
    }

    #[test]
    fn test_zero_steps_is_a_value() {
        let mut snapshot = HealthContextSnapshot::empty("Maya");
        snapshot.today_steps = Some(0);
        assert!(snapshot.render().contains("- Today's steps: 0"));
    }
}
