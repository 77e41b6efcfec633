//! Portfolio CRUD service.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

use folio_core::error::Result;
use folio_core::types::{Portfolio, PortfolioId, PortfolioPayload, PortfolioSummary};
use folio_core::validate::validate_portfolio;

use crate::allocation::PortfolioRefresh;
use crate::rest::RestClient;

/// Typed wrapper over the `/portfolios` endpoints.
pub struct PortfoliosApi {
    rest: Arc<RestClient>,
}

impl PortfoliosApi {
    pub(crate) fn new(rest: Arc<RestClient>) -> Self {
        Self { rest }
    }

    /// Lists the caller's portfolios.
    pub async fn list(&self) -> Result<Vec<PortfolioSummary>> {
        self.rest.get("/portfolios").send_json().await
    }

    /// Fetches one portfolio with its nested assets and planned changes.
    pub async fn get(&self, id: PortfolioId) -> Result<Portfolio> {
        self.rest.get(&format!("/portfolios/{id}")).send_json().await
    }

    /// Creates a portfolio.
    pub async fn create(&self, payload: &PortfolioPayload) -> Result<Portfolio> {
        validate_portfolio(payload)?;
        let portfolio: Portfolio = self.rest.post("/portfolios").json(payload).send_json().await?;
        info!(id = %portfolio.id, name = %portfolio.name, "Created portfolio");
        Ok(portfolio)
    }

    /// Updates a portfolio.
    pub async fn update(&self, id: PortfolioId, payload: &PortfolioPayload) -> Result<Portfolio> {
        validate_portfolio(payload)?;
        self.rest
            .put(&format!("/portfolios/{id}"))
            .json(payload)
            .send_json()
            .await
    }

    /// Deletes a portfolio.
    pub async fn delete(&self, id: PortfolioId) -> Result<()> {
        self.rest.delete(&format!("/portfolios/{id}")).send_unit().await
    }
}

#[async_trait]
impl PortfolioRefresh for PortfoliosApi {
    async fn refresh(&self, id: PortfolioId) -> Result<()> {
        self.get(id).await.map(|_| ())
    }
}
