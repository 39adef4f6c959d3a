//! Error types for the Lead Panel dashboard.
//!
//! Every backend call returns a [`BackendError`] on failure. The dashboard
//! recovers from all of them at the call site: errors are logged with their
//! full detail and the user only ever sees a fixed message.

use thiserror::Error;

// =============================================================================
// Backend Errors
// =============================================================================

/// Errors from the identity and data backend.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum BackendError {
    /// A required configuration value is missing.
    #[error("Backend is not configured: missing {0}")]
    NotConfigured(String),

    /// The request never produced a response.
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("Server error ({status}): {message}")]
    Status { status: u16, message: String },

    /// Credentials were rejected by the identity provider.
    #[error("Authentication rejected: {0}")]
    AuthRejected(String),

    /// The operation requires a signed-in user.
    #[error("No active session")]
    NoSession,

    /// The response body could not be decoded.
    #[error("Invalid response: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for BackendError {
    fn from(err: serde_json::Error) -> Self {
        BackendError::Decode(err.to_string())
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for backend operations.
pub type BackendResult<T> = Result<T, BackendError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_format() {
        let err = BackendError::Status {
            status: 401,
            message: "JWT expired".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("401"));
        assert!(msg.contains("JWT expired"));
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_err = serde_json::from_str::<Vec<u8>>("{").unwrap_err();
        let err: BackendError = json_err.into();
        assert!(matches!(err, BackendError::Decode(_)));
    }
}
