//! Daily calorie and macro targets.
//!
//! The metabolic estimate is a Mifflin-St Jeor style base without the age
//! term (the profile carries no age), scaled by a workout-frequency band and
//! the user's surplus/deficit percentage. Every rounded value in the engine
//! rounds half away from zero (`f64::round`).

use serde::Serialize;

use crate::error::EngineError;

/// Per-meal target used when a user has no profile row yet.
pub const DEFAULT_MEAL_TARGET_KCAL: i32 = 600;

/// Energy split across macros. Changing these is a behavior change.
const PROTEIN_ENERGY_RATIO: f64 = 0.30;
const FAT_ENERGY_RATIO: f64 = 0.25;
const CARB_ENERGY_RATIO: f64 = 0.45;

/// Atwater factors, kcal per gram.
const KCAL_PER_G_PROTEIN: f64 = 4.0;
const KCAL_PER_G_FAT: f64 = 9.0;
const KCAL_PER_G_CARB: f64 = 4.0;

/// Target grams of each macro for a given calorie amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MacroTargets {
    pub protein_g: i32,
    pub fat_g: i32,
    pub carbs_g: i32,
}

fn activity_multiplier(workouts_per_week: i32) -> f64 {
    match workouts_per_week {
        0 => 1.20,
        1..=3 => 1.375,
        4..=6 => 1.55,
        _ => 1.725,
    }
}

/// Daily calorie target from the physiological profile.
///
/// `base = 10*weight + 6.25*height + 5`, scaled by the activity band, then by
/// `1 + threshold_percent/100` (negative = deficit).
pub fn daily_calories(
    weight_kg: f64,
    height_cm: f64,
    workouts_per_week: i32,
    threshold_percent: i32,
) -> Result<i32, EngineError> {
    if weight_kg <= 0.0 {
        return Err(EngineError::InvalidProfile("weight must be positive"));
    }
    if height_cm <= 0.0 {
        return Err(EngineError::InvalidProfile("height must be positive"));
    }
    if workouts_per_week < 0 {
        return Err(EngineError::InvalidProfile(
            "workouts per week cannot be negative",
        ));
    }

    let base = 10.0 * weight_kg + 6.25 * height_cm + 5.0;
    let raw = base * activity_multiplier(workouts_per_week);
    let adjusted = raw * (1.0 + f64::from(threshold_percent) / 100.0);
    Ok(adjusted.round() as i32)
}

/// Calorie target for a single meal: `daily / meals_per_day`, rounded.
pub fn calories_per_meal(daily_calories: i32, meals_per_day: i32) -> Result<i32, EngineError> {
    if meals_per_day <= 0 {
        return Err(EngineError::InvalidArgument("meals_per_day must be positive"));
    }
    Ok((f64::from(daily_calories) / f64::from(meals_per_day)).round() as i32)
}

/// Macro gram targets for a calorie amount: 30% protein / 25% fat / 45% carbs
/// of energy, converted at 4/9/4 kcal per gram.
pub fn macros_for_calories(calories: i32) -> Result<MacroTargets, EngineError> {
    if calories < 0 {
        return Err(EngineError::InvalidArgument("calories cannot be negative"));
    }
    let kcal = f64::from(calories);
    Ok(MacroTargets {
        protein_g: (kcal * PROTEIN_ENERGY_RATIO / KCAL_PER_G_PROTEIN).round() as i32,
        fat_g: (kcal * FAT_ENERGY_RATIO / KCAL_PER_G_FAT).round() as i32,
        carbs_g: (kcal * CARB_ENERGY_RATIO / KCAL_PER_G_CARB).round() as i32,
    })
}
