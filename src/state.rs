use std::sync::Arc;

use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::catalog::{FoodCatalogLookup, PgFoodCatalog};
use crate::config::AppConfig;
use crate::nutrition::repo::{NutritionLogStore, PgNutritionLog};

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub catalog: Arc<dyn FoodCatalogLookup>,
    pub nutrition_log: Arc<dyn NutritionLogStore>,
}

impl AppState {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Arc::new(AppConfig::from_env()?);

        let db = PgPoolOptions::new()
            .max_connections(10)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        let catalog = Arc::new(PgFoodCatalog::new(db.clone())) as Arc<dyn FoodCatalogLookup>;
        let nutrition_log = Arc::new(PgNutritionLog::new(db.clone())) as Arc<dyn NutritionLogStore>;

        Ok(Self {
            db,
            config,
            catalog,
            nutrition_log,
        })
    }
}
