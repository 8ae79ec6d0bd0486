//! Mood entry persistence.

use sqlx::SqlitePool;

use crate::models::{MoodEntry, NewMoodEntry};
use crate::validation::{mood_score, validate_scale};
use crate::{new_id, Result};

/// Log a mood for a user.
///
/// The mood score is derived from the label.
pub async fn create_entry(
    pool: &SqlitePool,
    owner: &str,
    entry: &NewMoodEntry,
) -> Result<MoodEntry> {
    let score = mood_score(&entry.mood_label)?;
    if let Some(level) = entry.stress_level {
        validate_scale("stress_level", level)?;
    }
    if let Some(level) = entry.energy_level {
        validate_scale("energy_level", level)?;
    }

    let record = sqlx::query_as::<_, MoodEntry>(
        r#"
        INSERT INTO mood_entries
            (id, owner, mood_label, mood_score, energy_level, stress_level, journal_entry)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, owner, mood_label, mood_score, energy_level, stress_level,
            journal_entry, created_at
        "#,
    )
    .bind(new_id())
    .bind(owner)
    .bind(&entry.mood_label)
    .bind(score)
    .bind(entry.energy_level)
    .bind(entry.stress_level)
    .bind(entry.journal_entry.as_deref())
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// List a user's most recent mood entries, newest first.
pub async fn list_recent(pool: &SqlitePool, owner: &str, limit: usize) -> Result<Vec<MoodEntry>> {
    let records = sqlx::query_as::<_, MoodEntry>(
        r#"
        SELECT id, owner, mood_label, mood_score, energy_level, stress_level,
            journal_entry, created_at
        FROM mood_entries
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
    use crate::{test_db, DatabaseError, ValidationError};

    #[tokio::test]
    async fn test_create_derives_score() {
        let db = test_db().await;
        let entry = NewMoodEntry::new("bad")
            .with_stress_level(4)
            .with_energy_level(2)
            .with_journal("Long day");

        let created = create_entry(db.pool(), "user-1", &entry).await.unwrap();
        assert_eq!(created.mood_score, 4);
        assert_eq!(created.stress_level, Some(4));
        assert_eq!(created.journal_entry.as_deref(), Some("Long day"));
    }

    #[tokio::test]
    async fn test_rejects_invalid_entries() {
        let db = test_db().await;

        let err = create_entry(db.pool(), "user-1", &NewMoodEntry::new("meh"))
            .await
            .unwrap_err();
        assert!(matches!(err, DatabaseError::Validation(ValidationError::UnknownMood(_))));

        let err = create_entry(db.pool(), "user-1", &NewMoodEntry::new("good").with_stress_level(9))
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Validation(ValidationError::OutOfRange { field: "stress_level", .. })
        ));
    }

    #[tokio::test]
    async fn test_list_recent_newest_first_with_limit() {
        let db = test_db().await;
        for label in ["great", "good", "okay", "bad"] {
            create_entry(db.pool(), "user-1", &NewMoodEntry::new(label))
                .await
                .unwrap();
        }
        create_entry(db.pool(), "user-2", &NewMoodEntry::new("terrible"))
            .await
            .unwrap();

        let recent = list_recent(db.pool(), "user-1", 3).await.unwrap();
        let labels: Vec<&str> = recent.iter().map(|e| e.mood_label.as_str()).collect();
        assert_eq!(labels, vec!["bad", "okay", "good"]);
    }
}
