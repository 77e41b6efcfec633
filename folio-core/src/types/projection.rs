//! Projection request and response models.
//!
//! The projection itself is computed by the backend; the client sends the
//! window and starting value and renders the returned time series as-is.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Request body for running a projection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionRequest {
    /// First date of the projection window.
    pub start_date: NaiveDate,

    /// Last date of the projection window.
    pub end_date: NaiveDate,

    /// Portfolio value at the start of the window.
    pub initial_total_value: Decimal,
}

/// One point of the projected time series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionPoint {
    /// Date of the projected value.
    pub date: NaiveDate,

    /// Projected portfolio value.
    pub value: Decimal,
}

/// Projection response, tolerant of both shapes the backend has used:
/// a bare array of points or `{"projection_results": [...]}`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProjectionSeries {
    /// Bare array of points.
    Bare(Vec<ProjectionPoint>),
    /// Points wrapped in an envelope object.
    Wrapped {
        /// The projected time series.
        projection_results: Vec<ProjectionPoint>,
    },
}

impl ProjectionSeries {
    /// Unwraps the response into its points.
    #[must_use]
    pub fn into_points(self) -> Vec<ProjectionPoint> {
        match self {
            Self::Bare(points) | Self::Wrapped {
                projection_results: points,
            } => points,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bare_array_shape() {
        let json = r#"[{"date": "2026-01-01", "value": 10000}, {"date": "2026-02-01", "value": "10050.25"}]"#;
        let series: ProjectionSeries = serde_json::from_str(json).unwrap();
        let points = series.into_points();
        assert_eq!(points.len(), 2);
        assert_eq!(points[1].value, dec!(10050.25));
    }

    #[test]
    fn test_wrapped_shape() {
        let json = r#"{"projection_results": [{"date": "2026-01-01", "value": 10000}]}"#;
        let series: ProjectionSeries = serde_json::from_str(json).unwrap();
        assert_eq!(series.into_points().len(), 1);
    }

    #[test]
    fn test_request_serialization() {
        let request = ProjectionRequest {
            start_date: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2036, 1, 1).unwrap(),
            initial_total_value: dec!(10000),
        };
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("\"start_date\":\"2026-01-01\""));
        assert!(json.contains("\"initial_total_value\":\"10000\""));
    }
}
