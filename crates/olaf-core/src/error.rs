//! Error types for OLAF.

use thiserror::Error;

/// Result type alias using OLAF's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for OLAF operations.
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation failed (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Fallback classifier failed
    #[error("Classifier error: {0}")]
    Classifier(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// File I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}

/// Failure modes of the fallback classifier.
///
/// `Unavailable` and `Malformed` produce the same user-visible reply (a
/// generic processing-error message) but are kept distinct so log lines
/// can tell a dead dependency from a misbehaving one. Neither is a
/// negative classification — an on-contract "I don't know" comes back as
/// a well-formed [`crate::ParseResult`] with unknown intent.
#[derive(Error, Debug)]
pub enum ClassifyError {
    /// The external model endpoint was unreachable, timed out, or
    /// answered with a non-success status.
    #[error("Classifier unavailable: {0}")]
    Unavailable(String),

    /// The endpoint answered, but the output did not parse as the
    /// required JSON shape.
    #[error("Malformed classifier output: {0}")]
    Malformed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_classifier() {
        let err = Error::Classifier("model timeout".to_string());
        assert_eq!(err.to_string(), "Classifier error: model timeout");
    }

    #[test]
    fn test_error_display_request() {
        let err = Error::Request("network unreachable".to_string());
        assert_eq!(err.to_string(), "Request error: network unreachable");
    }

    #[test]
    fn test_error_display_config() {
        let err = Error::Config("missing DATABASE_URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing DATABASE_URL");
    }

    #[test]
    fn test_from_serde_json_error() {
        let json_err = serde_json::from_str::<i32>("not a number");
        assert!(json_err.is_err());

        let err: Error = json_err.unwrap_err().into();
        match err {
            Error::Serialization(msg) => assert!(!msg.is_empty()),
            _ => panic!("Expected Serialization error"),
        }
    }

    #[test]
    fn test_classify_error_display() {
        let err = ClassifyError::Unavailable("connection refused".to_string());
        assert_eq!(err.to_string(), "Classifier unavailable: connection refused");

        let err = ClassifyError::Malformed("expected object".to_string());
        assert_eq!(err.to_string(), "Malformed classifier output: expected object");
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send<T: Send>() {}
        fn assert_sync<T: Sync>() {}

        assert_send::<Error>();
        assert_sync::<Error>();
        assert_send::<ClassifyError>();
        assert_sync::<ClassifyError>();
    }
}
