//! Asset models.

use rust_decimal::Decimal;
use serde::de::Deserializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::{AssetId, Percentage};

/// Asset category understood by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssetType {
    /// Individual stock.
    Stock,
    /// Exchange-traded fund.
    Etf,
    /// Bond or bond fund.
    Bond,
    /// Cryptocurrency.
    Crypto,
    /// Cash or cash equivalent.
    Cash,
    /// Anything else; requires a manual expected return.
    Other,
}

impl fmt::Display for AssetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Stock => "stock",
            Self::Etf => "etf",
            Self::Bond => "bond",
            Self::Crypto => "crypto",
            Self::Cash => "cash",
            Self::Other => "other",
        };
        write!(f, "{label}")
    }
}

/// An asset inside a portfolio, as reported by the backend.
///
/// The server-reported allocation percentage may be absent or non-numeric
/// in older records; deserialization is tolerant and yields `None` for
/// anything that is not a number, so callers default to zero instead of
/// failing the whole portfolio fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Asset {
    /// Asset identifier.
    pub id: AssetId,

    /// Asset category.
    pub asset_type: AssetType,

    /// Display name or ticker symbol.
    pub name_or_ticker: String,

    /// Server-reported allocation percentage, if any.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub allocation_percentage: Option<Decimal>,

    /// Manually specified expected annual return, in percent.
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub manual_expected_return: Option<Decimal>,
}

impl Asset {
    /// Returns the reported allocation as a valid [`Percentage`],
    /// defaulting to zero when absent.
    #[must_use]
    pub fn reported_percentage(&self) -> Percentage {
        self.allocation_percentage
            .map_or(Percentage::ZERO, Percentage::clamped)
    }
}

/// Request body for creating or updating an asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetPayload {
    /// Asset category.
    pub asset_type: AssetType,

    /// Display name or ticker symbol.
    pub name_or_ticker: String,

    /// Target allocation percentage.
    pub allocation_percentage: Option<Decimal>,

    /// Manually specified expected annual return, in percent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub manual_expected_return: Option<Decimal>,
}

/// Deserializes a decimal field tolerantly: numbers and numeric strings
/// parse, everything else (null, junk strings, wrong types) becomes `None`.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(match value {
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        _ => None,
    })
}
