use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::{error, info, instrument, warn};

use crate::ident::UserId;
use crate::nutrition::targets;
use crate::profile::dto::{ProfileResponse, PutProfileRequest};
use crate::profile::repo::UserProfile;
use crate::state::AppState;

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(put_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    let profile = UserProfile::get(&state.db, user_id)
        .await
        .map_err(internal)?
        .ok_or((StatusCode::NOT_FOUND, "Profile not found".to_string()))?;
    Ok(Json(profile.into()))
}

#[instrument(skip(state, payload))]
pub async fn put_profile(
    State(state): State<AppState>,
    UserId(user_id): UserId,
    Json(payload): Json<PutProfileRequest>,
) -> Result<Json<ProfileResponse>, (StatusCode, String)> {
    // Reject anything the calorie model would refuse, before it hits storage.
    let daily = targets::daily_calories(
        payload.weight_kg,
        payload.height_cm,
        payload.workouts_per_week,
        payload.calorie_threshold_percent,
    )
    .map_err(|e| {
        warn!(%user_id, error = %e, "profile rejected");
        <(StatusCode, String)>::from(e)
    })?;
    targets::calories_per_meal(daily, payload.meals_per_day).map_err(|e| {
        warn!(%user_id, error = %e, "profile rejected");
        <(StatusCode, String)>::from(e)
    })?;

    let profile = UserProfile::upsert(
        &state.db,
        user_id,
        payload.weight_kg,
        payload.height_cm,
        payload.workouts_per_week,
        payload.calorie_threshold_percent,
        payload.meals_per_day,
    )
    .await
    .map_err(internal)?;

    info!(%user_id, "profile updated");
    Ok(Json(profile.into()))
}

fn internal(e: anyhow::Error) -> (StatusCode, String) {
    error!(error = %e, "profile storage error");
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
