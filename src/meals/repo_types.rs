use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

/// Per-occurrence nutrition totals of a meal.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MealNutrition {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

impl MealNutrition {
    /// Scale every field by a multiplier (portion count, grams/100).
    pub fn scaled(&self, multiplier: f64) -> Self {
        Self {
            calories: self.calories * multiplier,
            protein_g: self.protein_g * multiplier,
            fat_g: self.fat_g * multiplier,
            carbs_g: self.carbs_g * multiplier,
        }
    }

    pub fn add(&mut self, other: &MealNutrition) {
        self.calories += other.calories;
        self.protein_g += other.protein_g;
        self.fat_g += other.fat_g;
        self.carbs_g += other.carbs_g;
    }
}

/// One catalog item inside a meal. `quantity` is grams against the per-100 g
/// catalog facts; `unit` is display metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ingredient {
    pub food_item_id: Uuid,
    pub quantity: f64,
    pub unit: String,
}

/// A meal template with its completion log. The log is a plain sequence of
/// timestamps: empty means never completed, and one meal may be completed any
/// number of times.
#[derive(Debug, Clone)]
pub struct MealRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub nutrition: MealNutrition,
    pub ingredients: Vec<Ingredient>,
    pub completions: Vec<OffsetDateTime>,
}

impl MealRecord {
    pub fn completed(&self) -> bool {
        !self.completions.is_empty()
    }
}
