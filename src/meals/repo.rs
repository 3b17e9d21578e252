use std::collections::HashMap;

use anyhow::Context;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::meals::repo_types::{Ingredient, MealNutrition, MealRecord};

#[derive(Debug, FromRow)]
struct MealRow {
    id: Uuid,
    user_id: Uuid,
    name: String,
    calories: f64,
    protein_g: f64,
    fat_g: f64,
    carbs_g: f64,
    ingredients: serde_json::Value,
}

#[derive(Debug, FromRow)]
struct CompletionRow {
    meal_id: Uuid,
    completed_at: OffsetDateTime,
}

impl MealRow {
    fn into_record(self, completions: Vec<OffsetDateTime>) -> anyhow::Result<MealRecord> {
        let ingredients: Vec<Ingredient> =
            serde_json::from_value(self.ingredients).context("decode meal ingredients")?;
        Ok(MealRecord {
            id: self.id,
            user_id: self.user_id,
            name: self.name,
            nutrition: MealNutrition {
                calories: self.calories,
                protein_g: self.protein_g,
                fat_g: self.fat_g,
                carbs_g: self.carbs_g,
            },
            ingredients,
            completions,
        })
    }
}

pub async fn insert(
    db: &PgPool,
    user_id: Uuid,
    name: &str,
    nutrition: &MealNutrition,
    ingredients: &[Ingredient],
) -> anyhow::Result<MealRecord> {
    let row = sqlx::query_as::<_, MealRow>(
        r#"
        INSERT INTO meals (id, user_id, name, calories, protein_g, fat_g, carbs_g, ingredients)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        RETURNING id, user_id, name, calories, protein_g, fat_g, carbs_g, ingredients
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .bind(name)
    .bind(nutrition.calories)
    .bind(nutrition.protein_g)
    .bind(nutrition.fat_g)
    .bind(nutrition.carbs_g)
    .bind(serde_json::to_value(ingredients).context("encode meal ingredients")?)
    .fetch_one(db)
    .await?;
    row.into_record(Vec::new())
}

/// The meal history feed: every meal of the user together with its full
/// completion log, one timestamp per completion event.
pub async fn list_with_completions(db: &PgPool, user_id: Uuid) -> anyhow::Result<Vec<MealRecord>> {
    let rows = sqlx::query_as::<_, MealRow>(
        r#"
        SELECT id, user_id, name, calories, protein_g, fat_g, carbs_g, ingredients
        FROM meals
        WHERE user_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let completions = sqlx::query_as::<_, CompletionRow>(
        r#"
        SELECT c.meal_id, c.completed_at
        FROM meal_completions c
        JOIN meals m ON m.id = c.meal_id
        WHERE m.user_id = $1
        ORDER BY c.completed_at ASC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await?;

    let mut by_meal: HashMap<Uuid, Vec<OffsetDateTime>> = HashMap::new();
    for c in completions {
        by_meal.entry(c.meal_id).or_default().push(c.completed_at);
    }

    rows.into_iter()
        .map(|row| {
            let log = by_meal.remove(&row.id).unwrap_or_default();
            row.into_record(log)
        })
        .collect()
}

pub async fn get_with_completions(
    db: &PgPool,
    user_id: Uuid,
    meal_id: Uuid,
) -> anyhow::Result<Option<MealRecord>> {
    let row = sqlx::query_as::<_, MealRow>(
        r#"
        SELECT id, user_id, name, calories, protein_g, fat_g, carbs_g, ingredients
        FROM meals
        WHERE id = $1 AND user_id = $2
        "#,
    )
    .bind(meal_id)
    .bind(user_id)
    .fetch_optional(db)
    .await?;

    let Some(row) = row else {
        return Ok(None);
    };

    let completions = sqlx::query_as::<_, CompletionRow>(
        r#"
        SELECT meal_id, completed_at
        FROM meal_completions
        WHERE meal_id = $1
        ORDER BY completed_at ASC
        "#,
    )
    .bind(meal_id)
    .fetch_all(db)
    .await?;

    let log = completions.into_iter().map(|c| c.completed_at).collect();
    Ok(Some(row.into_record(log)?))
}

pub async fn insert_completion(
    db: &PgPool,
    meal_id: Uuid,
    completed_at: OffsetDateTime,
) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO meal_completions (meal_id, completed_at)
        VALUES ($1, $2)
        "#,
    )
    .bind(meal_id)
    .bind(completed_at)
    .execute(db)
    .await?;
    Ok(())
}
