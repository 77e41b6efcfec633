//! Network-related error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Network error type covering connection failures, timeouts, HTTP status
/// failures, and malformed response bodies.
///
/// # Examples
///
/// ```
/// use folio_core::error::NetworkError;
///
/// let error = NetworkError::ConnectionFailed {
///     reason: "Connection refused".to_string(),
/// };
/// assert!(error.to_string().contains("Connection refused"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NetworkError {
    /// Connection to the backend failed.
    #[error("[Network] Connection failed: {reason}")]
    ConnectionFailed {
        /// Reason for the connection failure.
        reason: String,
    },

    /// Request timed out.
    #[error("[Network] Request timeout after {timeout_ms}ms")]
    Timeout {
        /// Timeout duration in milliseconds.
        timeout_ms: u64,
    },

    /// HTTP request failed at the transport level.
    #[error("[Network] HTTP error: status {status_code} - {reason}")]
    Http {
        /// HTTP status code (0 when none was received).
        status_code: u16,
        /// Reason for the HTTP error.
        reason: String,
    },

    /// Response body could not be parsed.
    #[error("[Network] Malformed response: {reason}")]
    MalformedResponse {
        /// Reason the body failed to parse.
        reason: String,
    },
}

impl NetworkError {
    /// Returns true if retrying the request may succeed.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Timeout { .. } | Self::ConnectionFailed { .. } => true,
            Self::Http { status_code, .. } => *status_code >= 500 || *status_code == 0,
            Self::MalformedResponse { .. } => false,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Timeout { .. } | Self::ConnectionFailed { .. } => ErrorSeverity::Recoverable,
            Self::Http { status_code, .. } if *status_code >= 500 => ErrorSeverity::Recoverable,
            Self::Http { .. } => ErrorSeverity::Warning,
            Self::MalformedResponse { .. } => ErrorSeverity::Fatal,
        }
    }

    /// Returns a suggested retry delay in milliseconds, if applicable.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> Option<u64> {
        match self {
            Self::Timeout { timeout_ms } => Some(*timeout_ms / 2),
            Self::ConnectionFailed { .. } => Some(1000),
            Self::Http { status_code, .. } if *status_code >= 500 => Some(1000),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timeout_recoverable() {
        let error = NetworkError::Timeout { timeout_ms: 5000 };
        assert!(error.to_string().contains("5000ms"));
        assert!(error.is_recoverable());
        assert_eq!(error.suggested_retry_delay_ms(), Some(2500));
    }

    #[test]
    fn test_server_error_recoverable() {
        let error = NetworkError::Http {
            status_code: 503,
            reason: "unavailable".to_string(),
        };
        assert!(error.is_recoverable());
    }

    #[test]
    fn test_client_error_not_recoverable() {
        let error = NetworkError::Http {
            status_code: 400,
            reason: "bad request".to_string(),
        };
        assert!(!error.is_recoverable());
        assert_eq!(error.suggested_retry_delay_ms(), None);
    }

    #[test]
    fn test_malformed_response_fatal() {
        let error = NetworkError::MalformedResponse {
            reason: "expected array".to_string(),
        };
        assert!(!error.is_recoverable());
        assert!(error.severity().is_fatal());
    }
}
