//! Percentage type for asset allocation targets.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Tolerance for the 100%-sum check: an allocation set is balanced when its
/// total is within 0.01 of 100.
pub const BALANCE_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

/// Rounds a decimal to two fractional digits, midpoint away from zero.
///
/// Idempotent: `round2(round2(x)) == round2(x)` for every `x`.
#[must_use]
pub fn round2(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

/// Allocation percentage - the share of total portfolio value targeted at
/// one asset.
///
/// Wraps a `Decimal` constrained to the closed interval [0, 100] and always
/// stored rounded to two decimal places.
///
/// # Examples
///
/// ```
/// use folio_core::types::Percentage;
/// use rust_decimal::Decimal;
///
/// let p = Percentage::clamped(Decimal::new(1505, 1)); // 150.5
/// assert_eq!(p, Percentage::FULL);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct Percentage(Decimal);

impl Percentage {
    /// Zero percent.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// One hundred percent.
    pub const FULL: Self = Self(Decimal::ONE_HUNDRED);

    /// Creates a new `Percentage`, rejecting values outside [0, 100].
    ///
    /// The accepted value is rounded to two decimal places.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::PercentageOutOfRange` if the value is
    /// negative or greater than 100.
    pub fn new(value: Decimal) -> Result<Self, ValidationError> {
        if value < Decimal::ZERO || value > Decimal::ONE_HUNDRED {
            return Err(ValidationError::PercentageOutOfRange(value));
        }
        Ok(Self(round2(value)))
    }

    /// Creates a new `Percentage`, clamping the value into [0, 100] and
    /// rounding to two decimal places.
    #[must_use]
    pub fn clamped(value: Decimal) -> Self {
        Self(round2(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED)))
    }

    /// Parses user input leniently.
    ///
    /// Returns `None` when the input is not a number (in-progress typing is
    /// expected here, so unparseable input is not an error); otherwise the
    /// parsed value is clamped and rounded like [`Percentage::clamped`].
    #[must_use]
    pub fn parse_lenient(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        Decimal::from_str(trimmed)
            .ok()
            .or_else(|| Decimal::from_scientific(trimmed).ok())
            .map(Self::clamped)
    }

    /// Returns the underlying `Decimal` value.
    #[must_use]
    pub const fn as_decimal(&self) -> Decimal {
        self.0
    }

    /// Returns true if the percentage is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for Percentage {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let decimal = Decimal::from_str(s)
            .map_err(|_| ValidationError::PercentageOutOfRange(Decimal::ZERO))?;
        Self::new(decimal)
    }
}

impl From<Percentage> for Decimal {
    fn from(percentage: Percentage) -> Self {
        percentage.0
    }
}
