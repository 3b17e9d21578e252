use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::profile::repo::UserProfile;

/// Request body for creating or replacing the caller's profile.
#[derive(Debug, Deserialize)]
pub struct PutProfileRequest {
    pub weight_kg: f64,
    pub height_cm: f64,
    pub workouts_per_week: i32,
    #[serde(default)]
    pub calorie_threshold_percent: i32,
    pub meals_per_day: i32,
}

/// Profile as returned to the client.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub workouts_per_week: i32,
    pub calorie_threshold_percent: i32,
    pub meals_per_day: i32,
    pub updated_at: OffsetDateTime,
}

impl From<UserProfile> for ProfileResponse {
    fn from(p: UserProfile) -> Self {
        Self {
            user_id: p.user_id,
            weight_kg: p.weight_kg,
            height_cm: p.height_cm,
            workouts_per_week: p.workouts_per_week,
            calorie_threshold_percent: p.calorie_threshold_percent,
            meals_per_day: p.meals_per_day,
            updated_at: p.updated_at,
        }
    }
}
