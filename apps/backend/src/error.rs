//! Error handling for the backend API

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Duplicate: {0}")]
    Duplicate(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Judge unavailable: {0}")]
    JudgeUnavailable(String),
}

/// Error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error_type) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            ApiError::Duplicate(_) => (StatusCode::BAD_REQUEST, "duplicate"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
            ApiError::JudgeUnavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, "judge_unavailable"),
            ApiError::Database(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let message = match &self {
            ApiError::JudgeUnavailable(_) => {
                "Answer checking is unavailable right now. Please try again.".to_string()
            }
            _ => self.to_string(),
        };

        let body = Json(ErrorResponse {
            error: error_type.to_string(),
            message,
        });

        (status, body).into_response()
    }
}

/// Result type alias for API operations
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_status() {
        let error = ApiError::NotFound("word 123".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_bad_request_status() {
        let error = ApiError::BadRequest("Sentence is required".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_duplicate_status() {
        let error = ApiError::Duplicate("Apple".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_conflict_status() {
        let error = ApiError::Conflict("stale review state".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_judge_unavailable_status() {
        let error = ApiError::JudgeUnavailable("timed out".to_string());
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn test_error_display_not_found() {
        let error = ApiError::NotFound("Word not found".to_string());
        assert_eq!(error.to_string(), "Not found: Word not found");
    }

    #[test]
    fn test_error_display_duplicate() {
        let error = ApiError::Duplicate("The word \"Apple\" is already in your list.".to_string());
        assert_eq!(
            error.to_string(),
            "Duplicate: The word \"Apple\" is already in your list."
        );
    }

    #[test]
    fn test_error_display_conflict() {
        let error = ApiError::Conflict("word changed".to_string());
        assert_eq!(error.to_string(), "Conflict: word changed");
    }
}
