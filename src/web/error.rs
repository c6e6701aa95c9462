//! API error handling for the CloudDrop web layer.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// API error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Bad request (400).
    BadRequest,
    /// Unauthorized (401).
    Unauthorized,
    /// Not found (404).
    NotFound,
    /// Conflict (409).
    Conflict,
    /// Service unavailable (503).
    ServiceUnavailable,
    /// Internal server error (500).
    InternalError,
}

impl ErrorCode {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorCode::BadRequest => StatusCode::BAD_REQUEST,
            ErrorCode::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorCode::NotFound => StatusCode::NOT_FOUND,
            ErrorCode::Conflict => StatusCode::CONFLICT,
            ErrorCode::ServiceUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            ErrorCode::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// API error response body.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    /// Error details.
    pub error: ErrorDetail,
}

/// Error detail.
#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    /// Error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
}

/// API error type.
#[derive(Debug)]
pub struct ApiError {
    code: ErrorCode,
    message: String,
}

impl ApiError {
    /// Create a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    /// Create a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Unauthorized, message)
    }

    /// Create a not found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message)
    }

    /// Create a conflict error.
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message)
    }

    /// Create a service unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ServiceUnavailable, message)
    }

    /// Create an internal server error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.code.status_code();
        let body = ErrorBody {
            error: ErrorDetail {
                code: self.code,
                message: self.message,
            },
        };
        (status, Json(body)).into_response()
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<crate::CloudDropError> for ApiError {
    fn from(err: crate::CloudDropError) -> Self {
        match &err {
            crate::CloudDropError::Auth(msg) => ApiError::unauthorized(msg.clone()),
            crate::CloudDropError::NotFound(msg) => ApiError::not_found(format!("{msg} not found")),
            crate::CloudDropError::Validation(msg) => ApiError::bad_request(msg.clone()),
            crate::CloudDropError::Conflict(msg) => ApiError::conflict(msg.clone()),
            crate::CloudDropError::DatabaseConnection(_) => {
                tracing::warn!("persistence unavailable: {}", err);
                ApiError::unavailable("Database not ready")
            }
            _ => {
                // Store and disk errors are logged for the operator, never
                // echoed back to the caller.
                tracing::error!("Internal error: {}", err);
                ApiError::internal("An internal error occurred")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CloudDropError;

    #[test]
    fn test_error_code_status() {
        assert_eq!(ErrorCode::BadRequest.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            ErrorCode::Unauthorized.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(ErrorCode::NotFound.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ErrorCode::Conflict.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            ErrorCode::ServiceUnavailable.status_code(),
            StatusCode::SERVICE_UNAVAILABLE
        );
        assert_eq!(
            ErrorCode::InternalError.status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_api_error_constructors() {
        assert_eq!(ApiError::bad_request("bad").code, ErrorCode::BadRequest);
        assert_eq!(
            ApiError::unauthorized("unauth").code,
            ErrorCode::Unauthorized
        );
        assert_eq!(ApiError::not_found("missing").code, ErrorCode::NotFound);
        assert_eq!(ApiError::conflict("dup").code, ErrorCode::Conflict);
        assert_eq!(
            ApiError::unavailable("down").code,
            ErrorCode::ServiceUnavailable
        );
        assert_eq!(ApiError::internal("error").code, ErrorCode::InternalError);
    }

    #[test]
    fn test_error_mapping() {
        let err: ApiError = CloudDropError::Auth("invalid credentials".to_string()).into();
        assert_eq!(err.code, ErrorCode::Unauthorized);

        let err: ApiError = CloudDropError::NotFound("upload".to_string()).into();
        assert_eq!(err.code, ErrorCode::NotFound);

        let err: ApiError = CloudDropError::Validation("bad id".to_string()).into();
        assert_eq!(err.code, ErrorCode::BadRequest);

        let err: ApiError = CloudDropError::Conflict("taken".to_string()).into();
        assert_eq!(err.code, ErrorCode::Conflict);

        let err: ApiError = CloudDropError::DatabaseConnection("refused".to_string()).into();
        assert_eq!(err.code, ErrorCode::ServiceUnavailable);

        let err: ApiError = CloudDropError::Database("boom".to_string()).into();
        assert_eq!(err.code, ErrorCode::InternalError);
    }

    #[test]
    fn test_internal_error_hides_details() {
        let err: ApiError = CloudDropError::Database("SELECT blew up at row 42".to_string()).into();
        assert_eq!(err.message, "An internal error occurred");
    }
}
