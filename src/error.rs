//! Custom error types for caravel-setup
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for setup operations
#[derive(Error, Debug)]
pub enum SetupError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for form input and settings
    #[error("Validation error: {0}")]
    Validation(String),

    /// A setup token was missing, expired, or did not match any record
    #[error("Token error: {0}")]
    Token(String),

    /// Feature key errors (malformed or expired)
    #[error("Feature key error: {0}")]
    FeatureKey(String),

    /// Outbound mail errors
    #[error("Mail error: {0}")]
    Mail(String),

    /// Storage errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl SetupError {
    /// Create a token error for a rejected one-time token
    pub fn token_rejected() -> Self {
        Self::Token("Setup token was not recognized or has expired".into())
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a token error
    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for SetupError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SetupError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for setup operations
pub type SetupResult<T> = Result<T, SetupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = SetupError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_token_rejected() {
        let err = SetupError::token_rejected();
        assert!(err.is_token());
        assert!(err.to_string().contains("expired"));
    }

    #[test]
    fn test_validation_check() {
        let err = SetupError::Validation("hostname required".into());
        assert!(err.is_validation());
        assert!(!err.is_token());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let setup_err: SetupError = io_err.into();
        assert!(matches!(setup_err, SetupError::Io(_)));
    }
}
