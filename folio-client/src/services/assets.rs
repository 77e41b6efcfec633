//! Asset CRUD and bulk-allocation service.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use folio_core::error::Result;
use folio_core::types::{Asset, AssetId, AssetPayload, PortfolioId};
use folio_core::validate::validate_asset;

use crate::allocation::{AllocationBackend, AllocationUpdate};
use crate::rest::RestClient;

#[derive(Serialize)]
struct AllocationsBody<'a> {
    allocations: &'a [AllocationUpdate],
}

/// Typed wrapper over the `/portfolios/:id/assets` endpoints.
pub struct AssetsApi {
    rest: Arc<RestClient>,
}

impl AssetsApi {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Adds an asset to a portfolio.
    pub async fn create(&self, portfolio: PortfolioId, payload: &AssetPayload) -> Result<Asset> {
        validate_asset(payload)?;
        let asset: Asset = self
            .rest
            .post(&format!("/portfolios/{portfolio}/assets"))
            .json(payload)
            .send_json()
            .await?;
        info!(portfolio = %portfolio, asset = %asset.id, "Added asset");
        Ok(asset)
    }

    /// Updates an asset.
    pub async fn update(
        &self,
        portfolio: PortfolioId,
        asset: AssetId,
        payload: &AssetPayload,
    ) -> Result<Asset> {
        validate_asset(payload)?;
        self.rest
            .put(&format!("/portfolios/{portfolio}/assets/{asset}"))
            .json(payload)
            .send_json()
            .await
    }

    /// Removes an asset from a portfolio.
    pub async fn delete(&self, portfolio: PortfolioId, asset: AssetId) -> Result<()> {
        self.rest
            .delete(&format!("/portfolios/{portfolio}/assets/{asset}"))
            .send_unit()
            .await
    }

    /// Replaces the portfolio's full allocation set in one call.
    ///
    /// The backend receives the complete set every time; this is replace
    /// semantics, not an incremental patch.
    pub async fn update_allocations(
        &self,
        portfolio: PortfolioId,
        updates: &[AllocationUpdate],
    ) -> Result<()> {
        self.rest
            .put(&format!("/portfolios/{portfolio}/allocations"))
            .json(&AllocationsBody {
                allocations: updates,
            })
            .send_unit()
            .await
    }
}

#[async_trait]
impl AllocationBackend for AssetsApi {
    async fn update_allocations(
        &self,
        portfolio: PortfolioId,
        updates: &[AllocationUpdate],
    ) -> Result<()> {
        Self::update_allocations(self, portfolio, updates).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::types::Percentage;
    use rust_decimal_macros::dec;

    #[test]
    fn test_allocations_body_wire_shape() {
        let updates = vec![
            AllocationUpdate {
                asset_id: AssetId::new(1),
                allocation_percentage: Percentage::clamped(dec!(58.5)).as_decimal(),
            },
            AllocationUpdate {
                asset_id: AssetId::new(2),
                allocation_percentage: Percentage::clamped(dec!(41.5)).as_decimal(),
            },
        ];
        let body = AllocationsBody {
            allocations: &updates,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert_eq!(
            json,
            r#"{"allocations":[{"asset_id":1,"allocation_percentage":"58.5"},{"asset_id":2,"allocation_percentage":"41.5"}]}"#
        );
    }
}
