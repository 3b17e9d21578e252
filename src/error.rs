use axum::http::StatusCode;
use thiserror::Error;

/// Typed failures of the nutrition engine. All are local and synchronous;
/// nothing here is retryable.
#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    /// Profile data the calorie model cannot work with.
    #[error("invalid profile: {0}")]
    InvalidProfile(&'static str),

    /// A non-profile input outside its domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// Validate-meal attempted below the 80% calorie threshold.
    #[error("meal below validation threshold: {accumulated_kcal:.0} of {required_kcal:.0} kcal")]
    MealIncomplete {
        accumulated_kcal: f64,
        required_kcal: f64,
    },
}

impl EngineError {
    pub fn status(&self) -> StatusCode {
        match self {
            EngineError::InvalidProfile(_) | EngineError::InvalidArgument(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            EngineError::MealIncomplete { .. } => StatusCode::CONFLICT,
        }
    }
}

impl From<EngineError> for (StatusCode, String) {
    fn from(e: EngineError) -> Self {
        (e.status(), e.to_string())
    }
}
