//! Unified error handling for the catalog service.
//!
//! Provides an `ApiError` type whose responses carry the wire error shape
//! `{"error": "..."}`. All route handlers return `Result<T, ApiError>`.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Application-level error type for the catalog service.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad request from client (malformed page, unknown category).
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Simulated upstream failure from the chaos configuration.
    #[error("simulated upstream failure")]
    SimulatedFailure,

    /// Internal server error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if matches!(self, Self::Internal(_)) {
            tracing::error!(error = %self, "request error");
        }

        let status = match &self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::SimulatedFailure | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::BadRequest(msg) => msg.clone(),
            Self::SimulatedFailure | Self::Internal(_) => "Internal server error".to_string(),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::BadRequest("invalid page: abc".to_string());
        assert_eq!(err.to_string(), "bad request: invalid page: abc");

        let err = ApiError::SimulatedFailure;
        assert_eq!(err.to_string(), "simulated upstream failure");
    }

    #[test]
    fn test_api_error_status_codes() {
        fn get_status(err: ApiError) -> StatusCode {
            err.into_response().status()
        }

        assert_eq!(
            get_status(ApiError::BadRequest("test".to_string())),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            get_status(ApiError::SimulatedFailure),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            get_status(ApiError::Internal("test".to_string())),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
