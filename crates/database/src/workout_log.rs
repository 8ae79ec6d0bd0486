//! Workout log persistence.

use sqlx::SqlitePool;

use crate::models::{NewWorkoutLog, WorkoutLog};
use crate::validation::validate_name;
use crate::{new_id, Result};

/// Record a completed workout.
pub async fn create_log(pool: &SqlitePool, owner: &str, log: &NewWorkoutLog) -> Result<WorkoutLog> {
    validate_name("workout name", &log.name)?;

    let record = sqlx::query_as::<_, WorkoutLog>(
        r#"
        INSERT INTO workout_logs (id, owner, name, duration_minutes, calories_burned)
        VALUES (?, ?, ?, ?, ?)
        RETURNING id, owner, name, duration_minutes, calories_burned, created_at
        "#,
    )
    .bind(new_id())
    .bind(owner)
    .bind(log.name.trim())
    .bind(log.duration_minutes)
    .bind(log.calories_burned)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// List a user's most recent workouts, newest first.
pub async fn list_recent(pool: &SqlitePool, owner: &str, limit: usize) -> Result<Vec<WorkoutLog>> {
    let records = sqlx::query_as::<_, WorkoutLog>(
        r#"
        SELECT id, owner, name, duration_minutes, calories_burned, created_at
        FROM workout_logs
        WHERE owner = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT ?
        "#,
    )
    .bind(owner)
    .bind(limit as i64)
    .fetch_all(pool)
    .await?;

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;

    #[tokio::test]
    async fn test_create_trims_name() {
        let db = test_db().await;
        let draft = NewWorkoutLog::new("  Morning run ").with_duration(30);
        let created = create_log(db.pool(), "user-1", &draft).await.unwrap();

        assert_eq!(created.name, "Morning run");
        assert_eq!(created.duration_minutes, Some(30));
    }

    #[tokio::test]
    async fn test_rejects_blank_name() {
        let db = test_db().await;
        assert!(create_log(db.pool(), "user-1", &NewWorkoutLog::new(" "))
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_list_recent_caps_at_limit() {
        let db = test_db().await;
        for i in 0..9 {
            create_log(db.pool(), "user-1", &NewWorkoutLog::new(format!("Session {i}")))
                .await
                .unwrap();
        }

        let recent = list_recent(db.pool(), "user-1", 7).await.unwrap();
        assert_eq!(recent.len(), 7);
        assert_eq!(recent[0].name, "Session 8");
    }
}
