//! Meal log persistence.

use chrono::NaiveDate;
use sqlx::SqlitePool;

use crate::models::{MealLog, NewMealLog};
use crate::validation::validate_name;
use crate::{new_id, Result};

/// Record a meal.
pub async fn create_meal(pool: &SqlitePool, owner: &str, meal: &NewMealLog) -> Result<MealLog> {
    validate_name("meal name", &meal.name)?;

    let record = sqlx::query_as::<_, MealLog>(
        r#"
        INSERT INTO meal_logs (id, owner, date, name, calories, protein, carbs, fat)
        VALUES (?, ?, ?, ?, ?, ?, ?, ?)
        RETURNING id, owner, date, name, calories, protein, carbs, fat, created_at
        "#,
    )
    .bind(new_id())
    .bind(owner)
    .bind(meal.date.to_string())
    .bind(meal.name.trim())
    .bind(meal.calories)
    .bind(meal.protein)
    .bind(meal.carbs)
    .bind(meal.fat)
    .fetch_one(pool)
    .await?;

    Ok(record)
}

/// List the meals a user logged on a date, in logging order.
pub async fn list_for_date(
    pool: &SqlitePool,
    owner: &str,
    date: NaiveDate,
) -> Result<Vec<MealLog>> {
    let records = sqlx::query_as::<_, MealLog>(
        r#"
        SELECT id, owner, date, name, calories, protein, carbs, fat, created_at
        FROM meal_logs
        WHERE owner = ? AND date = ?
        ORDER BY created_at ASC, rowid ASC
        "#,
    )
    .bind(owner)
    .bind(date.to_string())
    .fetch_all(pool)
    .await?;

    Ok(records)
}
