//! Cumulative price curves built from one question's answers.

use serde::{Deserialize, Serialize};

/// Which side of a price a respondent's threshold is counted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CumulativeDirection {
    /// Share of respondents whose threshold is at or below the price.
    /// Non-decreasing; used for "expensive" and "too expensive".
    Ascending,
    /// Share of respondents whose threshold is at or above the price.
    /// Non-increasing; used for "too cheap" and "cheap".
    Descending,
}

/// A point on a cumulative curve. `percentage` is on a 0-100 scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: f64,
    pub percentage: f64,
}

impl CurvePoint {
    pub fn new(price: f64, percentage: f64) -> Self {
        Self { price, percentage }
    }
}

/// Piecewise-linear cumulative curve with strictly increasing prices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceCurve {
    direction: CumulativeDirection,
    points: Vec<CurvePoint>,
}

impl PriceCurve {
    /// Wraps points that are already sorted by strictly increasing price.
    pub fn from_points(direction: CumulativeDirection, points: Vec<CurvePoint>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].price < w[1].price));
        Self { direction, points }
    }

    pub fn direction(&self) -> CumulativeDirection {
        self.direction
    }

    pub fn points(&self) -> &[CurvePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Adjacent point pairs in increasing price order.
    pub fn segments(&self) -> impl Iterator<Item = (CurvePoint, CurvePoint)> + '_ {
        self.points.windows(2).map(|w| (w[0], w[1]))
    }

    /// Lowest and highest price on the curve.
    pub fn price_range(&self) -> Option<(f64, f64)> {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => Some((first.price, last.price)),
            _ => None,
        }
    }
}

/// Builds cumulative curves from per-respondent thresholds.
pub struct PriceCurveBuilder;

impl PriceCurveBuilder {
    /// Builds the cumulative curve for one question's thresholds.
    ///
    /// Sorts, collapses equal prices, then derives every percentage from a
    /// single running count, so the whole build is O(n log n).
    ///
    /// # Edge Cases
    /// - Empty input (or only non-finite values): empty curve
    /// - One distinct price: one-point curve at 100%
    pub fn build(thresholds: &[f64], direction: CumulativeDirection) -> PriceCurve {
        let mut sorted: Vec<f64> = thresholds.iter().copied().filter(|t| t.is_finite()).collect();
        if sorted.is_empty() {
            return PriceCurve::from_points(direction, Vec::new());
        }
        sorted.sort_by(f64::total_cmp);

        let total = sorted.len();
        let mut distinct: Vec<(f64, usize)> = Vec::new();
        for price in sorted {
            match distinct.last_mut() {
                Some((last, count)) if *last == price => *count += 1,
                _ => distinct.push((price, 1)),
            }
        }

        // Respondents with a threshold strictly below the current price.
        let mut below = 0usize;
        let points = distinct
            .into_iter()
            .map(|(price, count)| {
                let matching = match direction {
                    CumulativeDirection::Ascending => below + count,
                    CumulativeDirection::Descending => total - below,
                };
                below += count;
                CurvePoint::new(price, matching as f64 / total as f64 * 100.0)
            })
            .collect();

        PriceCurve::from_points(direction, points)
    }
}
