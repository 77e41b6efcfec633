//! `NewType` wrappers and wire models for the Folio backend.
//!
//! This module provides type-safe wrappers around decimal values and the
//! serde models exchanged with the backend over JSON.
//!
//! # Types
//!
//! - [`Percentage`] - Allocation percentages, clamped to [0, 100] at 2 dp
//! - [`PortfolioId`], [`AssetId`], [`ChangeId`] - Resource identifiers
//! - [`Portfolio`], [`PortfolioSummary`] - Portfolio records
//! - [`Asset`], [`AssetPayload`] - Portfolio assets
//! - [`PlannedChange`], [`ChangePayload`] - Future cash-flow events
//! - [`ProjectionRequest`], [`ProjectionPoint`] - Backend projection I/O

mod asset;
mod change;
mod ids;
mod percentage;
mod portfolio;
mod projection;

pub use asset::{Asset, AssetPayload, AssetType};
pub use change::{ChangePayload, ChangeType, PlannedChange};
pub use ids::{AssetId, ChangeId, PortfolioId};
pub use percentage::{BALANCE_TOLERANCE, Percentage, round2};
pub use portfolio::{Portfolio, PortfolioPayload, PortfolioSummary};
pub use projection::{ProjectionPoint, ProjectionRequest, ProjectionSeries};

/// Validation error for `NewType` construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Percentage value is outside the closed interval [0, 100]
    #[error("percentage must be between 0 and 100: {0}")]
    PercentageOutOfRange(rust_decimal::Decimal),
}
