//! Error types for CloudDrop.

use thiserror::Error;

/// Common error type for CloudDrop.
#[derive(Error, Debug)]
pub enum CloudDropError {
    /// Database error.
    ///
    /// This is a generic database error that wraps errors from the
    /// persistence backend. Errors from sqlx are automatically converted.
    #[error("database error: {0}")]
    Database(String),

    /// Database connection error.
    ///
    /// Raised when the persistence backend cannot be reached or a pooled
    /// connection cannot be acquired within the configured timeout.
    #[error("database connection error: {0}")]
    DatabaseConnection(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Authentication error.
    #[error("authentication error: {0}")]
    Auth(String),

    /// Validation error for user input.
    #[error("validation error: {0}")]
    Validation(String),

    /// Resource already exists.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Resource not found.
    #[error("{0} not found")]
    NotFound(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

// Conversion from sqlx errors. Pool-level failures are kept distinct from
// statement-level failures so the web layer can answer 503 instead of 500
// while the store is unreachable.
impl From<sqlx::Error> for CloudDropError {
    fn from(e: sqlx::Error) -> Self {
        match e {
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
                CloudDropError::DatabaseConnection(e.to_string())
            }
            other => CloudDropError::Database(other.to_string()),
        }
    }
}

/// Result type alias for CloudDrop operations.
pub type Result<T> = std::result::Result<T, CloudDropError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_display() {
        let err = CloudDropError::Auth("invalid credentials".to_string());
        assert_eq!(err.to_string(), "authentication error: invalid credentials");
    }

    #[test]
    fn test_validation_error_display() {
        let err = CloudDropError::Validation("email is required".to_string());
        assert_eq!(err.to_string(), "validation error: email is required");
    }

    #[test]
    fn test_not_found_error_display() {
        let err = CloudDropError::NotFound("upload".to_string());
        assert_eq!(err.to_string(), "upload not found");
    }

    #[test]
    fn test_conflict_error_display() {
        let err = CloudDropError::Conflict("email already registered".to_string());
        assert_eq!(err.to_string(), "conflict: email already registered");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: CloudDropError = io_err.into();
        assert!(matches!(err, CloudDropError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_pool_timeout_maps_to_connection_error() {
        let err: CloudDropError = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, CloudDropError::DatabaseConnection(_)));
    }

    #[test]
    fn test_row_not_found_maps_to_database_error() {
        let err: CloudDropError = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, CloudDropError::Database(_)));
    }

    #[test]
    fn test_result_alias() {
        fn sample_ok() -> Result<i32> {
            Ok(42)
        }

        fn sample_err() -> Result<i32> {
            Err(CloudDropError::Auth("test".to_string()))
        }

        assert_eq!(sample_ok().unwrap(), 42);
        assert!(sample_err().is_err());
    }
}
