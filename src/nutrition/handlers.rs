use axum::{
    extract::{Query, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use time::OffsetDateTime;
use tracing::{error, instrument};

use crate::ident::UserId;
use crate::meals::repo as meals_repo;
use crate::nutrition::aggregate::totals_for_window;
use crate::nutrition::dto::{
    DaySummary, LogEntry, LogParams, SummaryParams, SummaryResponse, TargetsResponse,
};
use crate::nutrition::score::score;
use crate::nutrition::targets;
use crate::profile::repo::UserProfile;
use crate::state::AppState;

/// Longest chartable window.
const MAX_WINDOW_DAYS: u32 = 90;

pub fn nutrition_routes() -> Router<AppState> {
    Router::new()
        .route("/nutrition/targets", get(get_targets))
        .route("/nutrition/summary", get(get_summary))
        .route("/nutrition/log", get(get_log))
}

#[instrument(skip(state))]
pub async fn get_targets(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<TargetsResponse>, (StatusCode, String)> {
    let (daily, per_meal) = caller_targets(&state, user_id).await?;
    let daily_macros = targets::macros_for_calories(daily).map_err(engine)?;
    let per_meal_macros = targets::macros_for_calories(per_meal).map_err(engine)?;
    Ok(Json(TargetsResponse {
        daily_calories: daily,
        calories_per_meal: per_meal,
        daily_macros,
        per_meal_macros,
    }))
}

/// GET /nutrition/summary?days=N — per-day totals and scores for the window
/// ending today, recomputed from the completion history on every call.
#[instrument(skip(state))]
pub async fn get_summary(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(params): Query<SummaryParams>,
) -> Result<Json<SummaryResponse>, (StatusCode, String)> {
    let (daily, _) = caller_targets(&state, user_id).await?;

    let meals = meals_repo::list_with_completions(&state.db, user_id)
        .await
        .map_err(internal)?;
    let today = OffsetDateTime::now_utc().date();
    let window = totals_for_window(&meals, today, params.days.min(MAX_WINDOW_DAYS))
        .map_err(engine)?;

    let days = window
        .iter()
        .map(|totals| {
            score(totals.calories, daily).map(|s| DaySummary::from_totals(totals, s))
        })
        .collect::<Result<Vec<_>, _>>()
        .map_err(engine)?;

    Ok(Json(SummaryResponse {
        target_calories: daily,
        days,
    }))
}

/// GET /nutrition/log — snapshots as persisted at validation time, newest
/// first. Unlike the summary, this is what was actually written, target
/// included.
#[instrument(skip(state))]
pub async fn get_log(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Query(params): Query<LogParams>,
) -> Result<Json<Vec<LogEntry>>, (StatusCode, String)> {
    let rows = state
        .nutrition_log
        .list_recent(user_id, params.limit.clamp(1, 365))
        .await
        .map_err(internal)?;
    Ok(Json(rows.into_iter().map(LogEntry::from).collect()))
}

async fn caller_targets(
    state: &AppState,
    user_id: uuid::Uuid,
) -> Result<(i32, i32), (StatusCode, String)> {
    let profile = UserProfile::get(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;

    let daily = targets::daily_calories(
        profile.weight_kg,
        profile.height_cm,
        profile.workouts_per_week,
        profile.calorie_threshold_percent,
    )
    .map_err(engine)?;
    let per_meal = targets::calories_per_meal(daily, profile.meals_per_day).map_err(engine)?;
    Ok((daily, per_meal))
}

fn engine(e: crate::error::EngineError) -> (StatusCode, String) {
    e.into()
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "nutrition storage error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
