//! Per-day aggregation of completed meals.
//!
//! A meal contributes its full nutrition once per completion, bucketed by the
//! calendar date of each completion timestamp. The output window always has
//! exactly `window_days` contiguous entries so charts never have holes.

use time::{Date, Duration};

use crate::error::EngineError;
use crate::meals::repo_types::MealRecord;

/// Totals for one calendar day. Derived, never persisted as-is.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyTotals {
    pub date: Date,
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub meal_count: u32,
}

impl DailyTotals {
    fn zero(date: Date) -> Self {
        Self {
            date,
            calories: 0.0,
            protein_g: 0.0,
            fat_g: 0.0,
            carbs_g: 0.0,
            meal_count: 0,
        }
    }
}

/// Daily totals for the `window_days` days ending at `reference_date`
/// inclusive, oldest first.
///
/// Pure and re-derivable: same inputs, same output, inputs untouched. Meals
/// completed several times on one day count once per completion; days with no
/// completions yield explicit all-zero entries.
pub fn totals_for_window(
    meals: &[MealRecord],
    reference_date: Date,
    window_days: u32,
) -> Result<Vec<DailyTotals>, EngineError> {
    if window_days == 0 {
        return Err(EngineError::InvalidArgument("window_days must be positive"));
    }

    let mut days = Vec::with_capacity(window_days as usize);
    for offset in (0..window_days).rev() {
        let date = reference_date - Duration::days(i64::from(offset));
        let mut totals = DailyTotals::zero(date);

        for meal in meals {
            let count = meal
                .completions
                .iter()
                .filter(|at| at.date() == date)
                .count() as u32;
            if count == 0 {
                continue;
            }
            let scaled = meal.nutrition.scaled(f64::from(count));
            totals.calories += scaled.calories;
            totals.protein_g += scaled.protein_g;
            totals.fat_g += scaled.fat_g;
            totals.carbs_g += scaled.carbs_g;
            totals.meal_count += count;
        }
        days.push(totals);
    }
    Ok(days)
}
