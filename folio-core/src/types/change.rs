//! Planned-change models.
//!
//! A planned change is a user-recorded future cash-flow event
//! (contribution, withdrawal, or rebalance) used as input to the backend
//! projection.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ChangeId;

/// Kind of planned cash-flow event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeType {
    /// Money added to the portfolio on the change date.
    Contribution,
    /// Money removed from the portfolio on the change date.
    Withdrawal,
    /// Reset to target allocations; carries no amount.
    Rebalance,
}

impl ChangeType {
    /// Returns true if this change kind carries a monetary amount.
    #[must_use]
    pub const fn has_amount(&self) -> bool {
        !matches!(self, Self::Rebalance)
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Contribution => "contribution",
            Self::Withdrawal => "withdrawal",
            Self::Rebalance => "rebalance",
        };
        write!(f, "{label}")
    }
}

/// A planned future cash-flow event, as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlannedChange {
    /// Change identifier.
    pub id: ChangeId,

    /// Kind of event.
    pub change_type: ChangeType,

    /// Date on which the event takes effect.
    pub change_date: NaiveDate,

    /// Monetary amount; absent for rebalances.
    #[serde(default)]
    pub amount: Option<Decimal>,

    /// Free-form description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request body for creating or updating a planned change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangePayload {
    /// Kind of event.
    pub change_type: ChangeType,

    /// Date on which the event takes effect.
    pub change_date: NaiveDate,

    /// Monetary amount; required for contributions and withdrawals,
    /// forbidden for rebalances.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<Decimal>,

    /// Free-form description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_change_type_has_amount() {
        assert!(ChangeType::Contribution.has_amount());
        assert!(ChangeType::Withdrawal.has_amount());
        assert!(!ChangeType::Rebalance.has_amount());
    }

    #[test]
    fn test_deserialize_change() {
        let json = r#"{
            "id": 5,
            "change_type": "contribution",
            "change_date": "2027-03-01",
            "amount": "500",
            "description": "monthly savings"
        }"#;
        let change: PlannedChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.change_type, ChangeType::Contribution);
        assert_eq!(change.amount, Some(dec!(500)));
        assert_eq!(
            change.change_date,
            NaiveDate::from_ymd_opt(2027, 3, 1).unwrap()
        );
    }

    #[test]
    fn test_deserialize_rebalance_without_amount() {
        let json = r#"{"id": 6, "change_type": "rebalance", "change_date": "2028-01-01"}"#;
        let change: PlannedChange = serde_json::from_str(json).unwrap();
        assert_eq!(change.change_type, ChangeType::Rebalance);
        assert_eq!(change.amount, None);
    }

    #[test]
    fn test_payload_skips_absent_fields() {
        let payload = ChangePayload {
            change_type: ChangeType::Rebalance,
            change_date: NaiveDate::from_ymd_opt(2028, 1, 1).unwrap(),
            amount: None,
            description: None,
        };
        let json = serde_json::to_string(&payload).unwrap();
        assert!(!json.contains("amount"));
        assert!(!json.contains("description"));
    }
}
