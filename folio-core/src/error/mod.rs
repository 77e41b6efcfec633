//! Error types and handling framework.
//!
//! # Error Hierarchy
//!
//! - `FolioError` - Top-level error type
//!   - `NetworkError` - Transport failures (connection, timeout, 5xx)
//!   - `ApiError` - Structured backend rejections
//!   - `FieldError` - Local form validation failures
//!   - `ConfigError` - Configuration errors
//!
//! The split mirrors the user-facing taxonomy: field errors are shown
//! inline and block submission, API errors become a single banner with the
//! server's message when it sends one, and parse failures on numeric input
//! are validation errors rather than exceptions.

use std::fmt;
use thiserror::Error;

mod api;
mod config;
mod network;

pub use api::{ApiError, GENERIC_API_MESSAGE};
pub use config::ConfigError;
pub use network::NetworkError;

pub use crate::validate::FieldError;

/// Error severity levels for categorizing errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring user or operator attention.
    Fatal,

    /// Error that can potentially be recovered from through retry.
    #[default]
    Recoverable,

    /// Non-critical issue that should be surfaced but doesn't prevent
    /// continued operation.
    Warning,
}

impl ErrorSeverity {
    /// Returns true if this error is recoverable (not fatal).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal)
    }

    /// Returns true if this error is fatal.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Top-level error type for the Folio client.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FolioError {
    /// Transport-level failure.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// Structured backend rejection.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Local form validation failure.
    #[error("{0}")]
    Validation(#[from] FieldError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl FolioError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(e) => e.severity(),
            Self::Api(e) => e.severity(),
            Self::Validation(_) => ErrorSeverity::Warning,
            Self::Config(e) => e.severity(),
        }
    }

    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Api(_) => "api",
            Self::Validation(_) => "validation",
            Self::Config(_) => "config",
        }
    }

    /// Returns the user-facing message for this error.
    ///
    /// API errors carry the server's message when one was present,
    /// otherwise the generic fallback; other categories use their
    /// `Display` form.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Api(e) => e.message().to_string(),
            other => other.to_string(),
        }
    }

    /// Returns the inner API error, if this is an API error.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner validation error, if this is a validation error.
    #[must_use]
    pub fn as_validation_error(&self) -> Option<&FieldError> {
        match self {
            Self::Validation(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for Folio operations.
pub type Result<T> = std::result::Result<T, FolioError>;
