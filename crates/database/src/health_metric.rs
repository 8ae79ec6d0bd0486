//! Daily health metric persistence.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{HealthMetric, NewHealthMetric};
use crate::{new_id, Result};

/// Insert a health metric row for a user.
pub async fn create_metric(
    pool: &SqlitePool,
    owner: &str,
    metric: &NewHealthMetric,
) -> Result<HealthMetric> {
    let record = sqlx::query_as::<_, HealthMetric>(
        r#"
        INSERT INTO health_metrics
            (id, owner, date, steps, sleep_hours, sleep_quality, water_intake)
        VALUES (?, ?, ?, ?, ?, ?, ?)
        RETURNING id, owner, date, steps, sleep_hours, sleep_quality, water_intake, created_at
        "#,
    )
    .bind(new_id())
    .bind(owner)
    .bind(metric.date.to_string())
    .bind(metric.steps)
    .bind(metric.sleep_hours)
    .bind(metric.sleep_quality.as_deref())
    .bind(metric.water_intake)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// Get the metric recorded for a user on a date.
///
/// If several rows exist for the date, the most recently created one wins.
pub async fn get_for_date(
    pool: &SqlitePool,
    owner: &str,
    date: NaiveDate,
) -> Result<Option<HealthMetric>> {
    let record = sqlx::query_as::<_, HealthMetric>(
        r#"
        SELECT id, owner, date, steps, sleep_hours, sleep_quality, water_intake, created_at
        FROM health_metrics
        WHERE owner = ? AND date = ?
        ORDER BY created_at DESC, rowid DESC
        LIMIT 1
        "#,
    )
    .bind(owner)
    .bind(date.to_string())
    .fetch_optional(pool)
    .await?;

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_db;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_and_get_for_date() {
        let db = test_db().await;
        let metric = NewHealthMetric::on(day(19))
            .with_steps(8421)
            .with_sleep(7.5, "good");

        let created = create_metric(db.pool(), "user-1", &metric).await.unwrap();
        assert_eq!(created.date, "2026-10-19");

        let fetched = get_for_date(db.pool(), "user-1", day(19))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.steps, Some(8421));
        assert_eq!(fetched.sleep_hours, Some(7.5));
        assert_eq!(fetched.sleep_quality.as_deref(), Some("good"));
    }

    #[tokio::test]
    async fn test_get_for_date_scopes_by_owner_and_date() {
        let db = test_db().await;
        create_metric(db.pool(), "user-1", &NewHealthMetric::on(day(18)).with_steps(100))
            .await
            .unwrap();
        create_metric(db.pool(), "user-2", &NewHealthMetric::on(day(19)).with_steps(200))
            .await
            .unwrap();

        assert!(get_for_date(db.pool(), "user-1", day(19))
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_latest_row_wins() {
        let db = test_db().await;
        create_metric(db.pool(), "user-1", &NewHealthMetric::on(day(19)).with_steps(100))
            .await
            .unwrap();
        create_metric(db.pool(), "user-1", &NewHealthMetric::on(day(19)).with_steps(5000))
            .await
            .unwrap();

        let fetched = get_for_date(db.pool(), "user-1", day(19))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.steps, Some(5000));
    }
}
