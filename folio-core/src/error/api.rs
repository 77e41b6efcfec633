//! Backend API error types.
//!
//! These represent structured rejections from the backend: the request
//! reached the server and was refused. The server's error message is kept
//! when it sends one; a generic fallback is substituted otherwise.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fallback message when the backend rejection carries no usable body.
pub const GENERIC_API_MESSAGE: &str = "the server could not process the request";

/// API error type covering authentication rejections, missing resources,
/// and structured backend refusals.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// The request was not authenticated or the token was rejected.
    #[error("[Api] Unauthorized: {message}")]
    Unauthorized {
        /// Message from the backend, or the generic fallback.
        message: String,
    },

    /// The requested resource does not exist.
    #[error("[Api] Not found: {message}")]
    NotFound {
        /// Message from the backend, or the generic fallback.
        message: String,
    },

    /// The backend refused the request.
    #[error("[Api] Rejected (status {status}): {message}")]
    Rejected {
        /// HTTP status code of the rejection.
        status: u16,
        /// Message from the backend, or the generic fallback.
        message: String,
    },
}

impl ApiError {
    /// Returns the user-facing message carried by this error.
    #[must_use]
    pub fn message(&self) -> &str {
        match self {
            Self::Unauthorized { message }
            | Self::NotFound { message }
            | Self::Rejected { message, .. } => message,
        }
    }

    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Unauthorized { .. } => ErrorSeverity::Fatal,
            Self::NotFound { .. } | Self::Rejected { .. } => ErrorSeverity::Warning,
        }
    }

    /// API rejections are never retried automatically.
    #[must_use]
    pub fn suggested_retry_delay_ms(&self) -> Option<u64> {
        None
    }
}
