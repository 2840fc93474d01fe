//! Error types for the Notiflow client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A shared error type for the entire Notiflow client.
///
/// This provides typed, structured error variants with automatic conversion
/// from common error types via the `From` trait. Variants that reach the
/// presentation layer carry the user-visible message directly.
#[derive(Error, Debug, Clone, Serialize, Deserialize)]
pub enum NotiflowError {
    /// Entity not found error with type information
    #[error("Entity not found: {entity_type} '{id}'")]
    NotFound { entity_type: String, id: String },

    /// IO error (file system operations)
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization/deserialization error
    #[error("Serialization error: {format} - {message}")]
    Serialization {
        format: String, // "TOML", "JSON", etc.
        message: String,
    },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// The stored session is missing, expired, or rejected by the backend
    #[error("Not authenticated")]
    Unauthorized,

    /// HTTP transport or status-level error
    #[error("HTTP error{}: {message}", .status.map(|s| format!(" ({s})")).unwrap_or_default())]
    Http {
        /// Status code, if a response was received at all.
        status: Option<u16>,
        message: String,
        /// Whether retrying the request could plausibly succeed
        /// (connect/timeout failures and 5xx responses).
        retryable: bool,
    },

    /// Error message reported by the backend in a response body
    #[error("{0}")]
    Api(String),

    /// A composer precondition failed; the message is user-facing
    #[error("{0}")]
    Validation(String),

    /// The backend accepted the request but reported the delivery failed
    #[error("Delivery failed: {0}")]
    Delivery(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl NotiflowError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a NotFound error
    pub fn not_found(entity_type: &str, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.to_string(),
            id: id.into(),
        }
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

    /// Creates a Validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Creates an Api error
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if this is a NotFound error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an Unauthorized error
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }

    /// Check if this is a Validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if retrying the failed operation could succeed.
    ///
    /// Only transport-level failures are considered retryable; a `Delivery`
    /// error means the backend already made a decision and the user must
    /// resubmit explicitly.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Http { retryable: true, .. })
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for NotiflowError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for NotiflowError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            format: "JSON".to_string(),
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NotiflowError {
    fn from(err: toml::de::Error) -> Self {
        Self::Serialization {
            format: "TOML".to_string(),
            message: err.to_string(),
        }
    }
}

/// Conversion from anyhow::Error (infrastructure plumbing boundary)
impl From<anyhow::Error> for NotiflowError {
    fn from(err: anyhow::Error) -> Self {
        Self::Internal(err.to_string())
    }
}

/// A type alias for `Result<T, NotiflowError>`.
pub type Result<T> = std::result::Result<T, NotiflowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_is_user_facing() {
        let err = NotiflowError::validation("Selecciona al menos un canal de envío.");
        assert_eq!(err.to_string(), "Selecciona al menos un canal de envío.");
        assert!(err.is_validation());
    }

    #[test]
    fn test_http_error_display_with_status() {
        let err = NotiflowError::Http {
            status: Some(500),
            message: "boom".to_string(),
            retryable: true,
        };
        assert!(err.to_string().contains("500"));
        assert!(err.is_retryable());
    }

    #[test]
    fn test_delivery_is_not_retryable() {
        let err = NotiflowError::Delivery("estado FAILED".to_string());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_io_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: NotiflowError = io_err.into();
        assert!(matches!(err, NotiflowError::Io { .. }));
    }
}
