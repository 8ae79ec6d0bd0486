//! Input validation for health records.

use thiserror::Error;

/// Validation error types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Goal is not one of [`GOALS`].
    #[error("unknown goal: {0}")]
    UnknownGoal(String),
    /// Activity level is not one of [`ACTIVITY_LEVELS`].
    #[error("unknown activity level: {0}")]
    UnknownActivityLevel(String),
    /// Mood label is not one of [`MOOD_LABELS`].
    #[error("unknown mood: {0}")]
    UnknownMood(String),
    /// A 1-5 scale value fell outside the scale.
    #[error("{field} must be between {min} and {max} (got {actual})")]
    OutOfRange {
        field: &'static str,
        min: i64,
        max: i64,
        actual: i64,
    },
    /// Value too long.
    #[error("{field} is too long ({actual} chars, max {max})")]
    TooLong {
        field: &'static str,
        max: usize,
        actual: usize,
    },
    /// Empty value where one is required.
    #[error("{0} cannot be empty")]
    Empty(&'static str),
}

/// Known wellness goals.
pub const GOALS: [&str; 6] = [
    "lose_weight",
    "gain_muscle",
    "maintain",
    "improve_fitness",
    "reduce_stress",
    "better_sleep",
];

/// Known activity levels.
pub const ACTIVITY_LEVELS: [&str; 4] = [
    "sedentary",
    "lightly_active",
    "moderately_active",
    "very_active",
];

/// Known mood labels, best first. The 1-based position is the mood score.
pub const MOOD_LABELS: [&str; 5] = ["great", "good", "okay", "bad", "terrible"];

/// Lowest value on the stress and energy scales.
pub const SCALE_MIN: i64 = 1;

/// Highest value on the stress and energy scales.
pub const SCALE_MAX: i64 = 5;

/// Maximum allowed length for meal and workout names.
pub const MAX_NAME_LENGTH: usize = 200;

/// Validate a wellness goal identifier.
pub fn validate_goal(goal: &str) -> Result<(), ValidationError> {
    if GOALS.contains(&goal) {
        Ok(())
    } else {
        Err(ValidationError::UnknownGoal(goal.to_string()))
    }
}

/// Validate an activity level identifier.
pub fn validate_activity_level(level: &str) -> Result<(), ValidationError> {
    if ACTIVITY_LEVELS.contains(&level) {
        Ok(())
    } else {
        Err(ValidationError::UnknownActivityLevel(level.to_string()))
    }
}

/// Validate a mood label and return its score.
pub fn mood_score(label: &str) -> Result<i64, ValidationError> {
    MOOD_LABELS
        .iter()
        .position(|known| *known == label)
        .map(|index| index as i64 + 1)
        .ok_or_else(|| ValidationError::UnknownMood(label.to_string()))
}

/// Validate a value on the 1-5 scale.
pub fn validate_scale(field: &'static str, value: i64) -> Result<(), ValidationError> {
    if (SCALE_MIN..=SCALE_MAX).contains(&value) {
        Ok(())
    } else {
        Err(ValidationError::OutOfRange {
            field,
            min: SCALE_MIN,
            max: SCALE_MAX,
            actual: value,
        })
    }
}

/// Validate a required, bounded name.
pub fn validate_name(field: &'static str, name: &str) -> Result<(), ValidationError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty(field));
    }

    let length = trimmed.chars().count();
    if length > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field,
            max: MAX_NAME_LENGTH,
            actual: length,
        });
    }

    Ok(())
}
