use axum::async_trait;
use sqlx::{FromRow, PgPool};
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::nutrition::aggregate::DailyTotals;

/// Persisted daily snapshot: totals, target at the time of writing, and the
/// number of completed meals. One row per user per day.
#[derive(Debug, Clone, FromRow)]
pub struct NutritionLog {
    pub user_id: Uuid,
    pub day: Date,
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
    pub meals_completed: i32,
    pub target_calories: Option<i32>,
    pub updated_at: OffsetDateTime,
}

/// Storage seam for the nutrition log. Writes carry the absolute recomputed
/// snapshot, so replaying one is a no-op.
#[async_trait]
pub trait NutritionLogStore: Send + Sync {
    async fn upsert_day(
        &self,
        user_id: Uuid,
        totals: &DailyTotals,
        target_calories: Option<i32>,
    ) -> anyhow::Result<()>;

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<NutritionLog>>;
}

pub struct PgNutritionLog {
    db: PgPool,
}

impl PgNutritionLog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl NutritionLogStore for PgNutritionLog {
    async fn upsert_day(
        &self,
        user_id: Uuid,
        totals: &DailyTotals,
        target_calories: Option<i32>,
    ) -> anyhow::Result<()> {
        sqlx::query(
            r#"
            INSERT INTO nutrition_log
                (user_id, day, calories, protein_g, fat_g, carbs_g,
                 meals_completed, target_calories, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, now())
            ON CONFLICT (user_id, day) DO UPDATE SET
                calories = EXCLUDED.calories,
                protein_g = EXCLUDED.protein_g,
                fat_g = EXCLUDED.fat_g,
                carbs_g = EXCLUDED.carbs_g,
                meals_completed = EXCLUDED.meals_completed,
                target_calories = EXCLUDED.target_calories,
                updated_at = now()
            "#,
        )
        .bind(user_id)
        .bind(totals.date)
        .bind(totals.calories)
        .bind(totals.protein_g)
        .bind(totals.fat_g)
        .bind(totals.carbs_g)
        .bind(totals.meal_count as i32)
        .bind(target_calories)
        .execute(&self.db)
        .await?;
        Ok(())
    }

    async fn list_recent(&self, user_id: Uuid, limit: i64) -> anyhow::Result<Vec<NutritionLog>> {
        let rows = sqlx::query_as::<_, NutritionLog>(
            r#"
            SELECT user_id, day, calories, protein_g, fat_g, carbs_g,
                   meals_completed, target_calories, updated_at
            FROM nutrition_log
            WHERE user_id = $1
            ORDER BY day DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
