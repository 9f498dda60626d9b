//! Common error types for Fyyur

use sqlx::error::ErrorKind;
use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error taxonomy shared by the store, the query layer and the web adapter
#[derive(Error, Debug)]
pub enum Error {
    /// Foreign key, uniqueness or CHECK constraint breach
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed form input
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Store could not be reached (pool closed, timed out, I/O failure)
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Any other database error
    #[error("Database error: {0}")]
    Database(sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// True for failures caused by the caller's input rather than the store
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::ConstraintViolation(_) | Error::NotFound(_) | Error::Validation(_)
        )
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            if matches!(
                db_err.kind(),
                ErrorKind::ForeignKeyViolation
                    | ErrorKind::UniqueViolation
                    | ErrorKind::NotNullViolation
                    | ErrorKind::CheckViolation
            ) {
                return Error::ConstraintViolation(db_err.message().to_string());
            }
        }

        match err {
            sqlx::Error::RowNotFound => Error::NotFound("row not found".to_string()),
            sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_) => {
                Error::StoreUnavailable(err.to_string())
            }
            other => Error::Database(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let err: Error = sqlx::Error::RowNotFound.into();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.is_client_error());
    }

    #[test]
    fn test_pool_timeout_maps_to_store_unavailable() {
        let err: Error = sqlx::Error::PoolTimedOut.into();
        assert!(matches!(err, Error::StoreUnavailable(_)));
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_display_messages() {
        let err = Error::Validation("name is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: name is required");

        let err = Error::NotFound("venue 7".to_string());
        assert_eq!(err.to_string(), "Not found: venue 7");
    }
}
