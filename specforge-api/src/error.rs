//! Error types for the SpecForge API layer

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    /// Resource not found (404)
    #[error("Resource not found: {0}")]
    NotFound(String),

    /// Invalid request (400)
    #[error("Invalid request: {0}")]
    BadRequest(String),

    /// External text-generation dependency failed (502)
    #[error("AI generation failure: {0}")]
    AiGeneration(String),

    /// Internal server error (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl From<specforge_common::Error> for ApiError {
    fn from(err: specforge_common::Error) -> Self {
        use specforge_common::Error;
        match err {
            Error::NotFound(msg) => ApiError::NotFound(msg),
            Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            Error::AiGeneration(msg) => ApiError::AiGeneration(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match self {
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg),
            ApiError::AiGeneration(msg) => (StatusCode::BAD_GATEWAY, "AI_GENERATION_ERROR", msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg),
        };

        let body = Json(json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        }));

        (status, body).into_response()
    }
}

/// Result type for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use specforge_common::Error;

    #[test]
    fn common_errors_map_to_client_facing_variants() {
        assert!(matches!(
            ApiError::from(Error::NotFound("x".to_string())),
            ApiError::NotFound(_)
        ));
        assert!(matches!(
            ApiError::from(Error::InvalidInput("x".to_string())),
            ApiError::BadRequest(_)
        ));
        assert!(matches!(
            ApiError::from(Error::AiGeneration("x".to_string())),
            ApiError::AiGeneration(_)
        ));
        assert!(matches!(
            ApiError::from(Error::Internal("x".to_string())),
            ApiError::Internal(_)
        ));
    }
}
