use axum::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::meals::repo_types::{Ingredient, MealNutrition};

/// Nutrition facts per 100 g of a catalog food item. Immutable at runtime.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct NutritionFacts {
    pub calories: f64,
    pub protein_g: f64,
    pub fat_g: f64,
    pub carbs_g: f64,
}

/// Read-only lookup into the seasonal food catalog.
#[async_trait]
pub trait FoodCatalogLookup: Send + Sync {
    async fn get(&self, food_item_id: Uuid) -> anyhow::Result<Option<NutritionFacts>>;
}

pub struct PgFoodCatalog {
    db: PgPool,
}

impl PgFoodCatalog {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl FoodCatalogLookup for PgFoodCatalog {
    async fn get(&self, food_item_id: Uuid) -> anyhow::Result<Option<NutritionFacts>> {
        let facts = sqlx::query_as::<_, NutritionFacts>(
            r#"
            SELECT calories, protein_g, fat_g, carbs_g
            FROM food_items
            WHERE id = $1
            "#,
        )
        .bind(food_item_id)
        .fetch_optional(&self.db)
        .await?;
        Ok(facts)
    }
}

/// Resolve an ordered ingredient list into meal nutrition totals, scaling the
/// per-100 g catalog facts by each ingredient's gram quantity. Unknown
/// catalog ids are an error, not a silent zero.
pub async fn nutrition_for_ingredients(
    catalog: &dyn FoodCatalogLookup,
    ingredients: &[Ingredient],
) -> anyhow::Result<MealNutrition> {
    let mut totals = MealNutrition::default();
    for ingredient in ingredients {
        let facts = catalog
            .get(ingredient.food_item_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("unknown food item {}", ingredient.food_item_id))?;
        let portion = MealNutrition {
            calories: facts.calories,
            protein_g: facts.protein_g,
            fat_g: facts.fat_g,
            carbs_g: facts.carbs_g,
        }
        .scaled(ingredient.quantity / 100.0);
        totals.add(&portion);
    }
    Ok(totals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    struct FakeCatalog {
        items: HashMap<Uuid, NutritionFacts>,
    }

    #[async_trait]
    impl FoodCatalogLookup for FakeCatalog {
        async fn get(&self, food_item_id: Uuid) -> anyhow::Result<Option<NutritionFacts>> {
            Ok(self.items.get(&food_item_id).cloned())
        }
    }

    fn ingredient(id: Uuid, grams: f64) -> Ingredient {
        Ingredient {
            food_item_id: id,
            quantity: grams,
            unit: "g".to_string(),
        }
    }

    #[tokio::test]
    async fn resolves_and_scales_per_100g() {
        let rice = Uuid::new_v4();
        let chicken = Uuid::new_v4();
        let catalog = FakeCatalog {
            items: HashMap::from([
                (
                    rice,
                    NutritionFacts {
                        calories: 130.0,
                        protein_g: 2.7,
                        fat_g: 0.3,
                        carbs_g: 28.0,
                    },
                ),
                (
                    chicken,
                    NutritionFacts {
                        calories: 165.0,
                        protein_g: 31.0,
                        fat_g: 3.6,
                        carbs_g: 0.0,
                    },
                ),
            ]),
        };

        let totals = nutrition_for_ingredients(
            &catalog,
            &[ingredient(rice, 200.0), ingredient(chicken, 150.0)],
        )
        .await
        .expect("resolve");

        assert!((totals.calories - (130.0 * 2.0 + 165.0 * 1.5)).abs() < 1e-9);
        assert!((totals.protein_g - (2.7 * 2.0 + 31.0 * 1.5)).abs() < 1e-9);
        assert!((totals.carbs_g - 56.0).abs() < 1e-9);
    }

    #[tokio::test]
    async fn unknown_item_is_an_error() {
        let catalog = FakeCatalog {
            items: HashMap::new(),
        };
        let err = nutrition_for_ingredients(&catalog, &[ingredient(Uuid::new_v4(), 100.0)])
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown food item"));
    }

    #[tokio::test]
    async fn empty_ingredient_list_is_zero() {
        let catalog = FakeCatalog {
            items: HashMap::new(),
        };
        let totals = nutrition_for_ingredients(&catalog, &[]).await.expect("resolve");
        assert_eq!(totals, MealNutrition::default());
    }
}
