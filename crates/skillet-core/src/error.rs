//! Error types for the Skillet client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message used when the server body carries nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "An error occurred while processing your request";

/// HTTP status codes treated as transient server failures.
///
/// Requests failing with one of these are eligible for retry; every other
/// non-2xx status is terminal.
pub const TRANSIENT_STATUSES: [u16; 6] = [408, 429, 500, 502, 503, 504];

/// A shared error type for the entire Skillet client.
///
/// Variants mirror the failure taxonomy the retry engine operates on:
/// `Network`, `Timeout` and `TransientServer` are retryable; everything else
/// is terminal. Classification happens once, at the client boundary.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum SkilletError {
    /// No response was received (connection refused, DNS failure, reset).
    #[error("Network error: {message}")]
    Network { message: String },

    /// The request exceeded its deadline. Treated as a network failure.
    #[error("Request timed out: {message}")]
    Timeout { message: String },

    /// The server answered with a status assumed transient (408, 429, 5xx).
    #[error("Server error ({status}): {message}")]
    TransientServer { status: u16, message: String },

    /// Terminal HTTP failure (4xx other than 408/429, or exhausted retries
    /// keep their original variant). The message is the server-provided one
    /// when present.
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },

    /// Client-side pre-flight rejection. Never reaches the network.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A mutation was attempted while another edit on the same field is
    /// still pending, or reconciliation failed after the UI advanced.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Session/authentication state error (e.g. an operation that requires
    /// a signed-in user was invoked without one).
    #[error("Session error: {0}")]
    Session(String),

    /// IO error (session/config persistence).
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization { format: String, message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SkilletError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network {
            message: message.into(),
        }
    }

    /// Creates a Timeout error
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Classifies a non-2xx status into `TransientServer` or `Http`.
    pub fn from_status(status: u16, message: impl Into<String>) -> Self {
        let message = message.into();
        if TRANSIENT_STATUSES.contains(&status) {
            Self::TransientServer { status, message }
        } else {
            Self::Http { status, message }
        }
    }

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates a Conflict error
    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict(message.into())
    }

    /// Creates a Session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }

    /// Creates an IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Classification methods
    // ============================================================================

    /// Whether re-attempting the same request may succeed.
    ///
    /// This is the single classification point the retry engine consumes:
    /// network failures, timeouts and transient server statuses are
    /// retryable; everything else is terminal.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::Network { .. } | Self::Timeout { .. } | Self::TransientServer { .. }
        )
    }

    /// Check if this is a client-side validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::TransientServer { status, .. } | Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<reqwest::Error> for SkilletError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout {
                message: err.to_string(),
            }
        } else if err.is_decode() {
            Self::Serialization {
                format: "JSON".to_string(),
                message: err.to_string(),
            }
        } else {
            // No response was received; retryable by definition.
            Self::Network {
                message: err.to_string(),
            }
        }
    }
}

impl From<std::io::Error> for SkilletError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SkilletError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SkilletError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::ser::Error> for SkilletError {
    fn from(err: toml::ser::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (transitional, should be removed eventually)
impl From<anyhow::Error> for SkilletError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, SkilletError>`.
pub type Result<T> = std::result::Result<T, SkilletError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transient_statuses_are_retryable() {
        for status in TRANSIENT_STATUSES {
            let err = SkilletError::from_status(status, "boom");
            assert!(err.is_retryable(), "status {status} should be retryable");
        }
    }

    #[test]
    fn test_client_statuses_are_terminal() {
        for status in [400, 401, 403, 404, 409, 422] {
            let err = SkilletError::from_status(status, "nope");
            assert!(!err.is_retryable(), "status {status} should be terminal");
            assert_eq!(err.status(), Some(status));
        }
    }

    #[test]
    fn test_network_and_timeout_are_retryable() {
        assert!(SkilletError::network("connection refused").is_retryable());
        assert!(SkilletError::timeout("deadline exceeded").is_retryable());
        assert!(!SkilletError::validation("file too large").is_retryable());
        assert!(!SkilletError::conflict("edit pending").is_retryable());
    }
}
