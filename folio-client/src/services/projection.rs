//! Projection service.
//!
//! The projection is computed server-side; this wrapper only carries the
//! window and starting value over and unwraps whichever response envelope
//! the backend uses.

use std::sync::Arc;

use folio_core::error::Result;
use folio_core::types::{PortfolioId, ProjectionPoint, ProjectionRequest, ProjectionSeries};

use crate::rest::RestClient;

/// Typed wrapper over the projection endpoint.
pub struct ProjectionApi {
    rest: Arc<RestClient>,
}

impl ProjectionApi {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Runs a projection for a portfolio and returns the time series.
    pub async fn run(
        &self,
        portfolio: PortfolioId,
        request: &ProjectionRequest,
    ) -> Result<Vec<ProjectionPoint>> {
        let series: ProjectionSeries = self
            .rest
            .post(&format!("/portfolios/{portfolio}/projections"))
            .json(request)
            .send_json()
            .await?;
        Ok(series.into_points())
    }
}
