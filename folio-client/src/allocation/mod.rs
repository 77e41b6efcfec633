//! Allocation management.
//!
//! The [`AllocationStore`] owns one portfolio's target-allocation mapping:
//! values are clamped to [0, 100] and rounded to two decimals on every
//! mutation, the sum is checked against a 100% tolerance before a save is
//! allowed, and a successful balanced save raises a short-lived success
//! pulse. Network effects go through the [`AllocationBackend`] and
//! [`PortfolioRefresh`] seams so the store can be tested without a server.

mod store;

pub use store::AllocationStore;

use async_trait::async_trait;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use folio_core::error::Result;
use folio_core::types::{AssetId, PortfolioId};

/// One entry of the bulk allocation update.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationUpdate {
    /// Asset the allocation applies to.
    pub asset_id: AssetId,

    /// Target allocation percentage.
    pub allocation_percentage: Decimal,
}

/// Destination of a bulk allocation save.
///
/// The store hands over the complete allocation set every time (replace
/// semantics). The production implementation is
/// [`AssetsApi`](crate::services::AssetsApi).
#[async_trait]
pub trait AllocationBackend: Send + Sync {
    /// Replaces the portfolio's allocation set.
    async fn update_allocations(
        &self,
        portfolio: PortfolioId,
        updates: &[AllocationUpdate],
    ) -> Result<()>;
}

/// Hook invoked after a successful save to refetch the owning portfolio.
///
/// The store never refetches on its own; the owning view supplies this
/// collaborator. The production implementation is
/// [`PortfoliosApi`](crate::services::PortfoliosApi).
#[async_trait]
pub trait PortfolioRefresh: Send + Sync {
    /// Refetches the portfolio identified by `id`.
    async fn refresh(&self, id: PortfolioId) -> Result<()>;
}

/// Result of a completed save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOutcome {
    /// Whether the pre-save total was within tolerance of 100%.
    ///
    /// Captured synchronously before the request went out, so edits made
    /// while the save was in flight do not affect it.
    pub balanced: bool,
}
