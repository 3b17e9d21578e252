use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

/// Physiological parameters driving the calorie targets. Read-only to the
/// engine; mutated only through the profile PUT handler.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct UserProfile {
    pub user_id: Uuid,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub workouts_per_week: i32,
    pub calorie_threshold_percent: i32,
    pub meals_per_day: i32,
    pub updated_at: OffsetDateTime,
}

impl UserProfile {
    pub async fn get(db: &PgPool, user_id: Uuid) -> anyhow::Result<Option<UserProfile>> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            SELECT user_id, weight_kg, height_cm, workouts_per_week,
                   calorie_threshold_percent, meals_per_day, updated_at
            FROM user_profiles
            WHERE user_id = $1
            "#,
        )
        .bind(user_id)
        .fetch_optional(db)
        .await?;
        Ok(profile)
    }

    pub async fn upsert(
        db: &PgPool,
        user_id: Uuid,
        weight_kg: f64,
        height_cm: f64,
        workouts_per_week: i32,
        calorie_threshold_percent: i32,
        meals_per_day: i32,
    ) -> anyhow::Result<UserProfile> {
        let profile = sqlx::query_as::<_, UserProfile>(
            r#"
            INSERT INTO user_profiles
                (user_id, weight_kg, height_cm, workouts_per_week,
                 calorie_threshold_percent, meals_per_day, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, now())
            ON CONFLICT (user_id) DO UPDATE SET
                weight_kg = EXCLUDED.weight_kg,
                height_cm = EXCLUDED.height_cm,
                workouts_per_week = EXCLUDED.workouts_per_week,
                calorie_threshold_percent = EXCLUDED.calorie_threshold_percent,
                meals_per_day = EXCLUDED.meals_per_day,
                updated_at = now()
            RETURNING user_id, weight_kg, height_cm, workouts_per_week,
                      calorie_threshold_percent, meals_per_day, updated_at
            "#,
        )
        .bind(user_id)
        .bind(weight_kg)
        .bind(height_cm)
        .bind(workouts_per_week)
        .bind(calorie_threshold_percent)
        .bind(meals_per_day)
        .fetch_one(db)
        .await?;
        Ok(profile)
    }
}
