//! Result and error types for the core library

use thiserror::Error;

/// Core library error type
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl Error {
    /// Create a database error
    pub fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    /// Create a not found error
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a validation error
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// True for errors caused by the caller's input rather than the store
    pub fn is_user_error(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Validation(_))
    }
}

impl From<duckdb::Error> for Error {
    fn from(err: duckdb::Error) -> Self {
        Self::Database(err.to_string())
    }
}

/// Core library result type
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::validation("name is required");
        assert_eq!(err.to_string(), "Validation error: name is required");

        let err = Error::not_found("account 42");
        assert_eq!(err.to_string(), "Not found: account 42");
    }

    #[test]
    fn test_user_error_classification() {
        assert!(Error::validation("x").is_user_error());
        assert!(Error::not_found("x").is_user_error());
        assert!(!Error::database("x").is_user_error());
        assert!(!Error::from(duckdb::Error::QueryReturnedNoRows).is_user_error());
    }
}
