//! The derived price analysis record.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ConfidenceBand;
use crate::domain::foundation::{CurrencyCode, ProductId, Timestamp};
use crate::domain::survey::PriceQuestion;

/// The four prices derived from curve intersections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PricePointKind {
    /// "too cheap" crosses "too expensive".
    OptimalPrice,
    /// "cheap" crosses "expensive".
    IndifferencePrice,
    /// "too cheap" crosses "expensive".
    RangeMin,
    /// "cheap" crosses "too expensive".
    RangeMax,
}

impl PricePointKind {
    pub const ALL: [PricePointKind; 4] = [
        PricePointKind::OptimalPrice,
        PricePointKind::IndifferencePrice,
        PricePointKind::RangeMin,
        PricePointKind::RangeMax,
    ];

    /// The pair of question curves whose crossing defines this price.
    pub fn curves(&self) -> (PriceQuestion, PriceQuestion) {
        match self {
            PricePointKind::OptimalPrice => (PriceQuestion::TooCheap, PriceQuestion::TooExpensive),
            PricePointKind::IndifferencePrice => (PriceQuestion::Cheap, PriceQuestion::Expensive),
            PricePointKind::RangeMin => (PriceQuestion::TooCheap, PriceQuestion::Expensive),
            PricePointKind::RangeMax => (PriceQuestion::Cheap, PriceQuestion::TooExpensive),
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PricePointKind::OptimalPrice => "optimal price point",
            PricePointKind::IndifferencePrice => "indifference price point",
            PricePointKind::RangeMin => "acceptable range minimum",
            PricePointKind::RangeMax => "acceptable range maximum",
        }
    }
}

impl fmt::Display for PricePointKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (first, second) = self.curves();
        write!(f, "{} (\"{}\" x \"{}\")", self.label(), first, second)
    }
}

/// Band between the two remaining cross-curve intersections.
///
/// A bound is `None` when its curves do not cross.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AcceptablePriceRange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl AcceptablePriceRange {
    /// Checks whether a price lies inside the range; false if either bound is missing.
    pub fn contains(&self, price: f64) -> bool {
        match (self.min, self.max) {
            (Some(min), Some(max)) => price >= min && price <= max,
            _ => false,
        }
    }
}

/// Van Westendorp analysis of one product's survey responses.
///
/// Pure derived data: recomputed wholesale from the current response set
/// and superseded by the next computation. Price points that could not be
/// determined are absent rather than zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnalysis {
    pub product_id: ProductId,
    pub currency: CurrencyCode,
    pub sample_size: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimal_price_point: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub indifference_price_point: Option<f64>,
    pub acceptable_price_range: AcceptablePriceRange,
    pub confidence: f64,
    pub confidence_band: ConfidenceBand,
    pub last_updated: Timestamp,
}

impl PriceAnalysis {
    /// Returns the derived price of the given kind.
    pub fn price_point(&self, kind: PricePointKind) -> Option<f64> {
        match kind {
            PricePointKind::OptimalPrice => self.optimal_price_point,
            PricePointKind::IndifferencePrice => self.indifference_price_point,
            PricePointKind::RangeMin => self.acceptable_price_range.min,
            PricePointKind::RangeMax => self.acceptable_price_range.max,
        }
    }

    /// Kinds of price point that could not be determined.
    pub fn missing_price_points(&self) -> Vec<PricePointKind> {
        PricePointKind::ALL
            .into_iter()
            .filter(|kind| self.price_point(*kind).is_none())
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_price_points().is_empty()
    }

    /// Compares everything except `last_updated`.
    pub fn same_result_as(&self, other: &PriceAnalysis) -> bool {
        Self {
            last_updated: other.last_updated,
            ..self.clone()
        } == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analysis() -> PriceAnalysis {
        PriceAnalysis {
            product_id: ProductId::new("course-42").unwrap(),
            currency: CurrencyCode::new("EUR").unwrap(),
            sample_size: 10,
            optimal_price_point: Some(26.5),
            indifference_price_point: None,
            acceptable_price_range: AcceptablePriceRange {
                min: Some(23.5),
                max: Some(29.0),
            },
            confidence: 0.1,
            confidence_band: ConfidenceBand::Low,
            last_updated: Timestamp::now(),
        }
    }

    #[test]
    fn serializes_wire_shape_and_omits_missing_points() {
        let json = serde_json::to_value(analysis()).unwrap();

        assert_eq!(json["productId"], "course-42");
        assert_eq!(json["currency"], "EUR");
        assert_eq!(json["sampleSize"], 10);
        assert_eq!(json["optimalPricePoint"], 26.5);
        assert!(json.get("indifferencePricePoint").is_none());
        assert_eq!(json["acceptablePriceRange"]["min"], 23.5);
        assert_eq!(json["acceptablePriceRange"]["max"], 29.0);
        assert_eq!(json["confidenceBand"], "low");
        assert!(json.get("lastUpdated").is_some());
    }

    #[test]
    fn deserializes_with_absent_points() {
        let original = analysis();
        let json = serde_json::to_string(&original).unwrap();
        let back: PriceAnalysis = serde_json::from_str(&json).unwrap();
        assert_eq!(back.indifference_price_point, None);
        assert!(back.same_result_as(&original));
    }

    #[test]
    fn missing_points_are_reported() {
        let a = analysis();
        assert_eq!(a.missing_price_points(), vec![PricePointKind::IndifferencePrice]);
        assert!(!a.is_complete());
    }

    #[test]
    fn same_result_ignores_timestamp() {
        let a = analysis();
        let b = PriceAnalysis {
            last_updated: a.last_updated.plus_secs(3600),
            ..a.clone()
        };
        assert!(a.same_result_as(&b));

        let c = PriceAnalysis {
            sample_size: 11,
            ..a.clone()
        };
        assert!(!a.same_result_as(&c));
    }

    #[test]
    fn range_contains_requires_both_bounds() {
        let range = AcceptablePriceRange {
            min: Some(10.0),
            max: Some(20.0),
        };
        assert!(range.contains(15.0));
        assert!(!range.contains(25.0));
        assert!(!AcceptablePriceRange::default().contains(15.0));
    }

    #[test]
    fn price_point_kind_display_names_curves() {
        assert_eq!(
            PricePointKind::OptimalPrice.to_string(),
            "optimal price point (\"too cheap\" x \"too expensive\")"
        );
    }
}
