//! User profile storage for personal goals.

use sqlx::SqlitePool;

use crate::models::{ProfileUpdate, UserProfile};
use crate::validation::{validate_activity_level, validate_goal};
use crate::Result;

/// Get a user's profile.
pub async fn get_profile(pool: &SqlitePool, owner: &str) -> Result<Option<UserProfile>> {
    let record = sqlx::query_as::<_, UserProfile>(
        r#"
        SELECT owner, goal, activity_level, daily_steps_goal, daily_calorie_goal,
               daily_water_goal, sleep_goal_hours, created_at, updated_at
        FROM user_profiles
        WHERE owner = ?
        "#,
    )
    .bind(owner)
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

/// Create or replace a user's profile.
///
/// Every column is overwritten with the update's value.
pub async fn upsert_profile(
    pool: &SqlitePool,
    owner: &str,
    update: &ProfileUpdate,
) -> Result<UserProfile> {
    if let Some(goal) = update.goal.as_deref() {
        validate_goal(goal)?;
    }
    if let Some(level) = update.activity_level.as_deref() {
        validate_activity_level(level)?;
    }

    let record = sqlx::query_as::<_, UserProfile>(
        r#"
        INSERT INTO user_profiles (
            owner, goal, activity_level, daily_steps_goal, daily_calorie_goal,
            daily_water_goal, sleep_goal_hours
        )
        VALUES (?, ?, ?, ?, ?, ?, ?)
        ON CONFLICT(owner) DO UPDATE SET
            goal = excluded.goal,
            activity_level = excluded.activity_level,
            daily_steps_goal = excluded.daily_steps_goal,
            daily_calorie_goal = excluded.daily_calorie_goal,
            daily_water_goal = excluded.daily_water_goal,
            sleep_goal_hours = excluded.sleep_goal_hours,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ', 'now')
        RETURNING owner, goal, activity_level, daily_steps_goal, daily_calorie_goal,
                  daily_water_goal, sleep_goal_hours, created_at, updated_at
        "#,
    )
    .bind(owner)
    .bind(update.goal.as_deref())
    .bind(update.activity_level.as_deref())
    .bind(update.daily_steps_goal)
    .bind(update.daily_calorie_goal)
    .bind(update.daily_water_goal)
    .bind(update.sleep_goal_hours)
    .fetch_one(pool)
    .await?;

    Ok(record)
}
