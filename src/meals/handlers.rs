use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, instrument, warn};
use uuid::Uuid;

use crate::catalog::nutrition_for_ingredients;
use crate::ident::UserId;
use crate::meals::dto::{CreateMealRequest, MealResponse, ValidateMealResponse};
use crate::meals::services::{validate_meal, ValidateMealError};
use crate::meals::{repo, repo_types::MealRecord};
use crate::nutrition::score::{score, Badge};
use crate::state::AppState;

pub fn meal_routes() -> Router<AppState> {
    Router::new()
        .route("/meals", get(list_meals).post(create_meal))
        .route("/meals/:id/validate", post(validate))
}

#[instrument(skip(state))]
pub async fn list_meals(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<Vec<MealResponse>>, (StatusCode, String)> {
    let meals = repo::list_with_completions(&state.db, user_id)
        .await
        .map_err(internal)?;
    Ok(Json(meals.into_iter().map(MealResponse::from).collect()))
}

#[instrument(skip(state, payload))]
pub async fn create_meal(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(payload): Json<CreateMealRequest>,
) -> Result<(StatusCode, Json<MealResponse>), (StatusCode, String)> {
    if payload.name.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "name must be non-empty".into()));
    }

    let nutrition = nutrition_for_ingredients(state.catalog.as_ref(), &payload.ingredients)
        .await
        .map_err(|e| {
            warn!(%user_id, error = %e, "ingredient resolution failed");
            (StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        })?;

    let meal: MealRecord = repo::insert(
        &state.db,
        user_id,
        payload.name.trim(),
        &nutrition,
        &payload.ingredients,
    )
    .await
    .map_err(internal)?;

    Ok((StatusCode::CREATED, Json(meal.into())))
}

/// POST /meals/:id/validate — gated by 80% of the per-meal calorie target.
#[instrument(skip(state))]
pub async fn validate(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Path(meal_id): Path<Uuid>,
) -> Result<Json<ValidateMealResponse>, (StatusCode, String)> {
    let now = OffsetDateTime::now_utc();
    let outcome = validate_meal(
        &state.db,
        state.nutrition_log.as_ref(),
        user_id,
        meal_id,
        now,
    )
    .await
    .map_err(|e| match e {
        ValidateMealError::NotFound => (StatusCode::NOT_FOUND, "Meal not found".to_string()),
        ValidateMealError::Engine(engine) => engine.into(),
        ValidateMealError::Storage(storage) => internal(storage),
    })?;

    let day_score = match outcome.target_calories {
        Some(target) => Some(score(outcome.today.calories, target).map_err(
            |e| -> (StatusCode, String) { e.into() },
        )?),
        None => None,
    };

    Ok(Json(ValidateMealResponse {
        meal_id: outcome.meal_id,
        completed_at: outcome.completed_at,
        calories_today: outcome.today.calories,
        meals_completed_today: outcome.today.meal_count,
        target_calories: outcome.target_calories,
        score: day_score,
        badge: day_score.map(Badge::for_score),
    }))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "meal storage error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
