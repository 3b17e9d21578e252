use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{Ingredient, MealNutrition, MealRecord};
use crate::nutrition::score::Badge;

/// Request body for creating a meal from catalog ingredients.
#[derive(Debug, Deserialize)]
pub struct CreateMealRequest {
    pub name: String,
    pub ingredients: Vec<Ingredient>,
}

/// A meal with its nutrition and completion log.
#[derive(Debug, Serialize)]
pub struct MealResponse {
    pub id: Uuid,
    pub name: String,
    pub nutrition: MealNutrition,
    pub ingredients: Vec<Ingredient>,
    pub completed: bool,
    pub completions: Vec<OffsetDateTime>,
}

impl From<MealRecord> for MealResponse {
    fn from(m: MealRecord) -> Self {
        Self {
            id: m.id,
            completed: m.completed(),
            name: m.name,
            nutrition: m.nutrition,
            ingredients: m.ingredients,
            completions: m.completions,
        }
    }
}

/// Response after a successful meal validation.
#[derive(Debug, Serialize)]
pub struct ValidateMealResponse {
    pub meal_id: Uuid,
    pub completed_at: OffsetDateTime,
    pub calories_today: f64,
    pub meals_completed_today: u32,
    pub target_calories: Option<i32>,
    pub score: Option<u8>,
    pub badge: Option<Badge>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meal_response_marks_completion() {
        let record = MealRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "salade de quinoa".to_string(),
            nutrition: MealNutrition {
                calories: 520.0,
                protein_g: 18.0,
                fat_g: 14.0,
                carbs_g: 78.0,
            },
            ingredients: Vec::new(),
            completions: vec![OffsetDateTime::UNIX_EPOCH],
        };
        let response = MealResponse::from(record);
        assert!(response.completed);
        let json = serde_json::to_string(&response).expect("serialize");
        assert!(json.contains("salade de quinoa"));
    }
}
