use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Application-level errors
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    /// Required credentials or settings are missing. Fatal at startup.
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The generative model could not be reached or answered with a failure status.
    #[error("Suggestion generation failed: {0}")]
    Generation(String),

    /// The model answered, but no usable title lines could be extracted.
    #[error("The model returned no usable title suggestions")]
    EmptySuggestions,

    /// Titles were suggested but none could be matched to a catalog entry.
    #[error("None of the {} suggested titles could be verified", .candidates.len())]
    NoReferencesResolved { candidates: Vec<String> },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            AppError::Generation(_) => StatusCode::BAD_GATEWAY,
            AppError::EmptySuggestions => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NoReferencesResolved { .. } => StatusCode::NOT_FOUND,
            AppError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AppError::NoReferencesResolved { candidates } => json!({
                "error": self.to_string(),
                "candidates": candidates,
            }),
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
