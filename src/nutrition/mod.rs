pub mod aggregate;
mod dto;
pub mod handlers;
pub mod repo;
pub mod score;
pub mod targets;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::nutrition_routes()
}
