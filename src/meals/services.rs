//! Validate-meal workflow.
//!
//! Validation is the only write path that feeds the nutrition log: the gate
//! is checked first and nothing is persisted below the threshold.

use sqlx::PgPool;
use thiserror::Error;
use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use crate::error::EngineError;
use crate::meals::repo;
use crate::nutrition::aggregate::{totals_for_window, DailyTotals};
use crate::nutrition::repo::NutritionLogStore;
use crate::nutrition::targets;
use crate::profile::repo::UserProfile;

/// A meal may be validated once it covers this share of the per-meal target.
pub const MEAL_VALIDATION_RATIO: f64 = 0.8;

/// The gate behind the "validate meal" action.
pub fn meal_ready_to_validate(accumulated_calories: f64, per_meal_target: i32) -> bool {
    per_meal_target > 0 && accumulated_calories / f64::from(per_meal_target) >= MEAL_VALIDATION_RATIO
}

pub fn ensure_meal_ready(
    accumulated_calories: f64,
    per_meal_target: i32,
) -> Result<(), EngineError> {
    if meal_ready_to_validate(accumulated_calories, per_meal_target) {
        Ok(())
    } else {
        Err(EngineError::MealIncomplete {
            accumulated_kcal: accumulated_calories,
            required_kcal: MEAL_VALIDATION_RATIO * f64::from(per_meal_target),
        })
    }
}

#[derive(Debug, Error)]
pub enum ValidateMealError {
    #[error("meal not found")]
    NotFound,
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

/// Outcome of a successful validation, including the recomputed day.
#[derive(Debug)]
pub struct ValidatedMeal {
    pub meal_id: Uuid,
    pub completed_at: OffsetDateTime,
    pub today: DailyTotals,
    pub target_calories: Option<i32>,
}

/// Gate, record a completion, recompute today through the aggregator and
/// snapshot it into the nutrition log.
pub async fn validate_meal(
    db: &PgPool,
    log_store: &dyn NutritionLogStore,
    user_id: Uuid,
    meal_id: Uuid,
    now: OffsetDateTime,
) -> Result<ValidatedMeal, ValidateMealError> {
    let profile = UserProfile::get(db, user_id).await?;
    let (per_meal_target, daily_target) = match &profile {
        Some(p) => {
            let daily = targets::daily_calories(
                p.weight_kg,
                p.height_cm,
                p.workouts_per_week,
                p.calorie_threshold_percent,
            )?;
            (targets::calories_per_meal(daily, p.meals_per_day)?, Some(daily))
        }
        None => (targets::DEFAULT_MEAL_TARGET_KCAL, None),
    };

    let meal = repo::get_with_completions(db, user_id, meal_id)
        .await?
        .ok_or(ValidateMealError::NotFound)?;

    if let Err(e) = ensure_meal_ready(meal.nutrition.calories, per_meal_target) {
        warn!(%user_id, %meal_id, error = %e, "meal validation refused");
        return Err(e.into());
    }

    repo::insert_completion(db, meal.id, now).await?;

    let meals = repo::list_with_completions(db, user_id).await?;
    let today = totals_for_window(&meals, now.date(), 1)?
        .pop()
        .expect("one-day window has one entry");

    log_store.upsert_day(user_id, &today, daily_target).await?;

    info!(%user_id, %meal_id, calories_today = today.calories, "meal validated");
    Ok(ValidatedMeal {
        meal_id: meal.id,
        completed_at: now,
        today,
        target_calories: daily_target,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_opens_at_exactly_eighty_percent() {
        assert!(meal_ready_to_validate(648.0, 810));
        assert!(!meal_ready_to_validate(647.0, 810));
    }

    #[test]
    fn gate_stays_shut_on_degenerate_targets() {
        assert!(!meal_ready_to_validate(500.0, 0));
        assert!(!meal_ready_to_validate(500.0, -600));
    }

    #[test]
    fn ensure_meal_ready_reports_both_amounts() {
        assert_eq!(ensure_meal_ready(648.0, 810), Ok(()));
        assert_eq!(
            ensure_meal_ready(647.0, 810),
            Err(EngineError::MealIncomplete {
                accumulated_kcal: 647.0,
                required_kcal: 648.0,
            })
        );
    }

    #[test]
    fn gate_against_default_target() {
        // default target 600 kcal -> 480 kcal opens the gate
        assert!(meal_ready_to_validate(
            480.0,
            crate::nutrition::targets::DEFAULT_MEAL_TARGET_KCAL
        ));
        assert!(!meal_ready_to_validate(
            479.0,
            crate::nutrition::targets::DEFAULT_MEAL_TARGET_KCAL
        ));
    }
}
