//! # Folio Core
//!
//! Core types, validation, errors, and configuration for the Folio
//! portfolio-planning client.
//!
//! This crate provides:
//! - `NewType` wrappers for allocation percentages and resource identifiers
//! - Wire models for portfolios, assets, planned changes, and projections
//! - Form validation rules and the password-strength scorer
//! - Error types and handling framework
//! - Configuration loading with YAML/TOML/JSON support and environment
//!   variable overrides

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

/// Core type definitions and wire models
pub mod types;

/// Form validation and password-strength scoring
pub mod validate;

/// Error types and handling
pub mod error;

/// Configuration management
pub mod config;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::config::*;
    pub use crate::error::{ApiError, ConfigError, FolioError, NetworkError};
    pub use crate::types::*;
    pub use crate::validate::{FieldError, PasswordStrength};
}
