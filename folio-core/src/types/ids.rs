//! Identifier types for backend resources.
//!
//! Identifiers are opaque to the client; they wrap the backend's integer
//! keys so portfolio, asset, and change ids cannot be mixed up.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

macro_rules! define_id {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[repr(transparent)]
        #[serde(transparent)]
        pub struct $name(i64);

        impl $name {
            /// Creates a new identifier from a raw backend key.
            #[must_use]
            pub const fn new(value: i64) -> Self {
                Self(value)
            }

            /// Returns the raw backend key.
            #[must_use]
            pub const fn value(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                fmt::Display::fmt(&self.0, f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.parse::<i64>().map(Self)
            }
        }

        impl From<i64> for $name {
            fn from(value: i64) -> Self {
                Self(value)
            }
        }
    };
}

define_id! {
    /// Identifier of a portfolio.
    PortfolioId
}

define_id! {
    /// Identifier of an asset within a portfolio.
    AssetId
}

define_id! {
    /// Identifier of a planned change within a portfolio.
    ChangeId
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_display() {
        assert_eq!(PortfolioId::new(42).to_string(), "42");
        assert_eq!(AssetId::new(7).to_string(), "7");
    }

    #[test]
    fn test_id_from_str() {
        let id: AssetId = "17".parse().unwrap();
        assert_eq!(id.value(), 17);
        assert!("abc".parse::<AssetId>().is_err());
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = ChangeId::new(3);
        assert_eq!(serde_json::to_string(&id).unwrap(), "3");
        let parsed: ChangeId = serde_json::from_str("3").unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn test_ids_are_distinct_types() {
        // Compile-time property; ordering works within one type.
        assert!(AssetId::new(1) < AssetId::new(2));
    }
}
