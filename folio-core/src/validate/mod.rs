//! Form validation rules.
//!
//! Field validation is local and synchronous: it blocks submission and is
//! surfaced inline per field, never as an exception. Parse failures on
//! numeric input are validation errors too.

mod password;

pub use password::{MIN_REGISTRATION_SCORE, PasswordStrength, score_password};

use rust_decimal::Decimal;
use thiserror::Error;

use crate::types::{AssetPayload, ChangePayload, PortfolioPayload};

/// Maximum length of a portfolio or asset name.
pub const MAX_NAME_LEN: usize = 100;

/// Maximum length of a description.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// A field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// A required field is empty.
    #[error("{field} is required")]
    Required {
        /// Name of the empty field.
        field: &'static str,
    },

    /// A text field exceeds its length cap.
    #[error("{field} must be at most {max} characters")]
    TooLong {
        /// Name of the overlong field.
        field: &'static str,
        /// Maximum allowed length.
        max: usize,
    },

    /// A numeric field is outside its allowed range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange {
        /// Name of the out-of-range field.
        field: &'static str,
        /// Lower bound, inclusive.
        min: Decimal,
        /// Upper bound, inclusive.
        max: Decimal,
    },

    /// A contribution or withdrawal is missing its amount.
    #[error("amount is required for this change type")]
    AmountRequired,

    /// A rebalance carries an amount it must not have.
    #[error("amount is not allowed for a rebalance")]
    AmountForbidden,

    /// An amount is zero or negative.
    #[error("amount must be positive")]
    AmountNotPositive,

    /// A password scored below the registration minimum.
    #[error("password too weak: scored {score}, need at least {required}")]
    WeakPassword {
        /// Achieved strength score.
        score: u8,
        /// Minimum acceptable score.
        required: u8,
    },

    /// The allocation set does not sum to 100 within tolerance.
    #[error("allocations must total 100%, current total is {total}")]
    UnbalancedAllocations {
        /// Current allocation total.
        total: Decimal,
    },

    /// A save is already in flight for this allocation set.
    #[error("a save is already in progress")]
    SaveInFlight,
}

fn require(field: &'static str, value: &str) -> Result<(), FieldError> {
    if value.trim().is_empty() {
        return Err(FieldError::Required { field });
    }
    Ok(())
}

fn cap(field: &'static str, value: &str, max: usize) -> Result<(), FieldError> {
    if value.chars().count() > max {
        return Err(FieldError::TooLong { field, max });
    }
    Ok(())
}

/// Validates a portfolio create/update form.
pub fn validate_portfolio(payload: &PortfolioPayload) -> Result<(), FieldError> {
    require("name", &payload.name)?;
    cap("name", &payload.name, MAX_NAME_LEN)?;
    if let Some(description) = &payload.description {
        cap("description", description, MAX_DESCRIPTION_LEN)?;
    }
    Ok(())
}

/// Validates an asset create/update form.
pub fn validate_asset(payload: &AssetPayload) -> Result<(), FieldError> {
    require("name_or_ticker", &payload.name_or_ticker)?;
    cap("name_or_ticker", &payload.name_or_ticker, MAX_NAME_LEN)?;
    if let Some(allocation) = payload.allocation_percentage {
        if allocation < Decimal::ZERO || allocation > Decimal::ONE_HUNDRED {
            return Err(FieldError::OutOfRange {
                field: "allocation_percentage",
                min: Decimal::ZERO,
                max: Decimal::ONE_HUNDRED,
            });
        }
    }
    if let Some(expected_return) = payload.manual_expected_return {
        if expected_return < -Decimal::ONE_HUNDRED || expected_return > Decimal::ONE_HUNDRED {
            return Err(FieldError::OutOfRange {
                field: "manual_expected_return",
                min: -Decimal::ONE_HUNDRED,
                max: Decimal::ONE_HUNDRED,
            });
        }
    }
    Ok(())
}

/// Validates a planned-change create/update form.
///
/// Contributions and withdrawals require a positive amount; rebalances
/// must not carry one.
pub fn validate_change(payload: &ChangePayload) -> Result<(), FieldError> {
    match (payload.change_type.has_amount(), payload.amount) {
        (true, None) => return Err(FieldError::AmountRequired),
        (true, Some(amount)) if amount <= Decimal::ZERO => {
            return Err(FieldError::AmountNotPositive);
        }
        (false, Some(_)) => return Err(FieldError::AmountForbidden),
        _ => {}
    }
    if let Some(description) = &payload.description {
        cap("description", description, MAX_DESCRIPTION_LEN)?;
    }
    Ok(())
}

/// Validates a registration password against the strength minimum.
pub fn validate_password(password: &str) -> Result<(), FieldError> {
    let strength = score_password(password);
    if strength.score < MIN_REGISTRATION_SCORE {
        return Err(FieldError::WeakPassword {
            score: strength.score,
            required: MIN_REGISTRATION_SCORE,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AssetType, ChangeType};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn asset(allocation: Option<Decimal>) -> AssetPayload {
        AssetPayload {
            asset_type: AssetType::Etf,
            name_or_ticker: "VTI".to_string(),
            allocation_percentage: allocation,
            manual_expected_return: None,
        }
    }

    fn change(change_type: ChangeType, amount: Option<Decimal>) -> ChangePayload {
        ChangePayload {
            change_type,
            change_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
            amount,
            description: None,
        }
    }

    #[test]
    fn test_portfolio_name_required() {
        let payload = PortfolioPayload {
            name: "   ".to_string(),
            description: None,
        };
        assert_eq!(
            validate_portfolio(&payload),
            Err(FieldError::Required { field: "name" })
        );
    }

    #[test]
    fn test_portfolio_name_length_cap() {
        let payload = PortfolioPayload {
            name: "x".repeat(MAX_NAME_LEN + 1),
            description: None,
        };
        assert!(matches!(
            validate_portfolio(&payload),
            Err(FieldError::TooLong { field: "name", .. })
        ));
    }

    #[test]
    fn test_asset_allocation_range() {
        assert!(validate_asset(&asset(Some(dec!(50)))).is_ok());
        assert!(validate_asset(&asset(None)).is_ok());
        assert!(matches!(
            validate_asset(&asset(Some(dec!(101)))),
            Err(FieldError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_asset(&asset(Some(dec!(-1)))),
            Err(FieldError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_change_amount_rules() {
        assert!(validate_change(&change(ChangeType::Contribution, Some(dec!(500)))).is_ok());
        assert_eq!(
            validate_change(&change(ChangeType::Contribution, None)),
            Err(FieldError::AmountRequired)
        );
        assert_eq!(
            validate_change(&change(ChangeType::Withdrawal, Some(dec!(0)))),
            Err(FieldError::AmountNotPositive)
        );
        assert_eq!(
            validate_change(&change(ChangeType::Rebalance, Some(dec!(1)))),
            Err(FieldError::AmountForbidden)
        );
        assert!(validate_change(&change(ChangeType::Rebalance, None)).is_ok());
    }

    #[test]
    fn test_password_minimum() {
        assert!(validate_password("Tr1cky-Password").is_ok());
        assert!(matches!(
            validate_password("short"),
            Err(FieldError::WeakPassword { .. })
        ));
    }
}
