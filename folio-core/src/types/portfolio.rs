//! Portfolio models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Asset, PlannedChange, PortfolioId};

/// A portfolio with its nested assets and planned changes, as returned by
/// `GET /portfolios/:id`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Portfolio {
    /// Portfolio identifier.
    pub id: PortfolioId,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Assets held in this portfolio.
    #[serde(default)]
    pub assets: Vec<Asset>,

    /// Planned future cash-flow events.
    #[serde(default)]
    pub planned_changes: Vec<PlannedChange>,

    /// Creation timestamp, if the backend reports one.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    /// Last-update timestamp, if the backend reports one.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// A portfolio summary as returned by `GET /portfolios` (no nested
/// collections).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    /// Portfolio identifier.
    pub id: PortfolioId,

    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,

    /// Number of assets, if the backend reports it.
    #[serde(default)]
    pub asset_count: Option<u32>,
}

/// Request body for creating or updating a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioPayload {
    /// Display name.
    pub name: String,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_portfolio_with_defaults() {
        let json = r#"{"id": 1, "name": "Retirement"}"#;
        let portfolio: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(portfolio.name, "Retirement");
        assert!(portfolio.assets.is_empty());
        assert!(portfolio.planned_changes.is_empty());
        assert!(portfolio.created_at.is_none());
    }

    #[test]
    fn test_deserialize_portfolio_nested() {
        let json = r#"{
            "id": 1,
            "name": "Retirement",
            "description": "long horizon",
            "assets": [
                {"id": 1, "asset_type": "etf", "name_or_ticker": "VTI", "allocation_percentage": 60},
                {"id": 2, "asset_type": "bond", "name_or_ticker": "BND", "allocation_percentage": "41.5"}
            ],
            "planned_changes": [
                {"id": 9, "change_type": "rebalance", "change_date": "2030-06-01"}
            ]
        }"#;
        let portfolio: Portfolio = serde_json::from_str(json).unwrap();
        assert_eq!(portfolio.assets.len(), 2);
        assert_eq!(portfolio.planned_changes.len(), 1);
    }

    #[test]
    fn test_payload_serialization() {
        let payload = PortfolioPayload {
            name: "Taxable".to_string(),
            description: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert_eq!(json, r#"{"name":"Taxable"}"#);
    }
}
