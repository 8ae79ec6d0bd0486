//! Concurrent fan-in of the five health context reads.

use std::sync::Arc;

use chrono::NaiveDate;
use coach_core::Identity;
use tracing::debug;

use crate::context::{ContextSources, HealthContextSnapshot};
use crate::error::CoachError;
use crate::store::EntityStore;

/// Trailing mood entries considered.
pub const MOOD_WINDOW: usize = 3;

/// Trailing workout logs counted as "this week".
pub const WORKOUT_WINDOW: usize = 7;

/// Builds a [`HealthContextSnapshot`] from an [`EntityStore`].
#[derive(Clone)]
pub struct HealthContextAggregator {
    store: Arc<dyn EntityStore>,
}

impl HealthContextAggregator {
    pub fn new(store: Arc<dyn EntityStore>) -> Self {
        Self { store }
    }

    /// Read everything the snapshot needs for `today`.
    ///
    /// The reads run concurrently and the first failure aborts the whole
    /// aggregation; there is no partial snapshot.
    pub async fn aggregate(
        &self,
        identity: &Identity,
        today: NaiveDate,
    ) -> Result<HealthContextSnapshot, CoachError> {
        let owner = identity.id.as_str();

        let (metric, moods, workouts, meals, profile) = tokio::try_join!(
            self.store.health_metric_on(owner, today),
            self.store.recent_moods(owner, MOOD_WINDOW),
            self.store.recent_workouts(owner, WORKOUT_WINDOW),
            self.store.meals_on(owner, today),
            self.store.user_profile(owner),
        )
        .map_err(CoachError::Aggregation)?;

        debug!(
            "Aggregated context for {} on {}: metric={} moods={} workouts={} meals={} profile={}",
            owner,
            today,
            metric.is_some(),
            moods.len(),
            workouts.len(),
            meals.len(),
            profile.is_some()
        );

        Ok(HealthContextSnapshot::reduce(
            identity.display_name.clone(),
            ContextSources {
                metric,
                moods,
                workouts,
                meals,
                profile,
            },
        ))
    }
}
