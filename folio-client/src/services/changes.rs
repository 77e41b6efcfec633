//! Planned-change CRUD service.

use std::sync::Arc;

use folio_core::error::Result;
use folio_core::types::{ChangeId, ChangePayload, PlannedChange, PortfolioId};
use folio_core::validate::validate_change;

use crate::rest::RestClient;

/// Typed wrapper over the `/portfolios/:id/changes` endpoints.
pub struct ChangesApi {
    rest: Arc<RestClient>,
}

impl ChangesApi {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Records a planned change on a portfolio.
    pub async fn create(
        &self,
        portfolio: PortfolioId,
        payload: &ChangePayload,
    ) -> Result<PlannedChange> {
        validate_change(payload)?;
        self.rest
            .post(&format!("/portfolios/{portfolio}/changes"))
            .json(payload)
            .send_json()
            .await
    }

    /// Updates a planned change.
    pub async fn update(
        &self,
        portfolio: PortfolioId,
        change: ChangeId,
        payload: &ChangePayload,
    ) -> Result<PlannedChange> {
        validate_change(payload)?;
        self.rest
            .put(&format!("/portfolios/{portfolio}/changes/{change}"))
            .json(payload)
            .send_json()
            .await
    }

    /// Removes a planned change.
    pub async fn delete(&self, portfolio: PortfolioId, change: ChangeId) -> Result<()> {
        self.rest
            .delete(&format!("/portfolios/{portfolio}/changes/{change}"))
            .send_unit()
            .await
    }
}
