//! Error types for Courier

use thiserror::Error;

/// Result type for Courier operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Courier
#[derive(Error, Debug)]
pub enum Error {
    /// Payload bytes could not be read into the requested type
    #[error("{message}")]
    PayloadNotReadable {
        /// Human-readable description, including the parser's message
        message: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be written as JSON
    #[error("Could not write JSON: {source}")]
    SerializationFailed {
        #[source]
        source: serde_json::Error,
    },

    /// The type resolver refused the requested type
    #[error("Unresolvable type: {0}")]
    UnresolvableType(String),

    /// Malformed media type
    #[error("Invalid media type: {0}")]
    InvalidMediaType(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Wrap a parse failure as [`Error::PayloadNotReadable`]
    pub fn payload_not_readable(source: serde_json::Error) -> Self {
        Error::PayloadNotReadable {
            message: format!("Could not read JSON: {}", source),
            source,
        }
    }

    /// Wrap an encoding failure as [`Error::SerializationFailed`]
    pub fn serialization_failed(source: serde_json::Error) -> Self {
        Error::SerializationFailed { source }
    }

    /// Whether the caller should answer with a client error rather than a server error
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::PayloadNotReadable { .. } | Error::InvalidMediaType(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_payload_not_readable_message() {
        let cause = serde_json::from_str::<serde_json::Value>("{\"a\":").unwrap_err();
        let err = Error::payload_not_readable(cause);

        assert!(err.to_string().starts_with("Could not read JSON: "));
        assert!(err.source().is_some());
        assert!(err.is_client_error());
    }

    #[test]
    fn test_serialization_failed_keeps_cause() {
        let cause = <serde_json::Error as serde::ser::Error>::custom("boom");
        let err = Error::serialization_failed(cause);

        assert_eq!(err.to_string(), "Could not write JSON: boom");
        assert!(err.source().is_some());
        assert!(!err.is_client_error());
    }
}
