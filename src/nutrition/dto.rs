use serde::{Deserialize, Serialize};

use crate::nutrition::aggregate::DailyTotals;
use crate::nutrition::repo::NutritionLog;
use crate::nutrition::score::Badge;
use crate::nutrition::targets::MacroTargets;

/// Computed targets for the caller's profile.
#[derive(Debug, Serialize)]
pub struct TargetsResponse {
    pub daily_calories: i32,
    pub calories_per_meal: i32,
    pub daily_macros: MacroTargets,
    pub per_meal_macros: MacroTargets,
}

#[derive(Debug, Deserialize)]
pub struct SummaryParams {
    #[serde(default = "default_window_days")]
    pub days: u32,
}

fn default_window_days() -> u32 {
    7
}

/// One charted day: totals plus its adherence score.
#[derive(Debug, Serialize)]
pub struct DaySummary {
    pub date: String,
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub meal_count: u32,
    pub score: u8,
    pub badge: Badge,
}

impl DaySummary {
    pub fn from_totals(totals: &DailyTotals, score: u8) -> Self {
        Self {
            date: totals.date.to_string(),
            calories: totals.calories,
            protein_g: totals.protein_g,
            fat_g: totals.fat_g,
            carbs_g: totals.carbs_g,
            meal_count: totals.meal_count,
            score,
            badge: Badge::for_score(score),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub target_calories: i32,
    pub days: Vec<DaySummary>,
}

#[derive(Debug, Deserialize)]
pub struct LogParams {
    #[serde(default = "default_log_limit")]
    pub limit: i64,
}

fn default_log_limit() -> i64 {
    30
}

/// Persisted snapshot as written at validation time.
#[derive(Debug, Serialize)]
pub struct LogEntry {
    pub day: String,
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub meals_completed: i32,
    pub target_calories: Option<i32>,
}

impl From<NutritionLog> for LogEntry {
    fn from(row: NutritionLog) -> Self {
        Self {
            day: row.day.to_string(),
            calories: row.calories,
            protein_g: row.protein_g,
            fat_g: row.fat_g,
            carbs_g: row.carbs_g,
            meals_completed: row.meals_completed,
            target_calories: row.target_calories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn day_summary_serializes_iso_date_and_badge_label() {
        let totals = DailyTotals {
            date: date!(2026 - 08 - 06),
            calories: 1800.0,
            protein_g: 120.0,
            fat_g: 55.0,
            carbs_g: 210.0,
            meal_count: 3,
        };
        let summary = DaySummary::from_totals(&totals, 90);
        let json = serde_json::to_string(&summary).expect("serialize");
        assert!(json.contains("\"2026-08-06\""));
        assert!(json.contains("\"Excellent\""));
    }

    #[test]
    fn summary_params_default_to_a_week() {
        let params: SummaryParams = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(params.days, 7);
    }
}
