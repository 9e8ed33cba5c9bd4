//! Crossing points of two piecewise-linear price curves.

use super::curve::{CurvePoint, PriceCurve};

/// Tolerance for segment parameters and parallel-line detection.
const EPSILON: f64 = 1e-9;

/// Finds where two cumulative curves cross.
pub struct IntersectionSolver;

impl IntersectionSolver {
    /// Returns the lowest price at which the two curves cross.
    ///
    /// Every segment of `first` is tested against every segment of `second`
    /// whose price range overlaps it; each candidate pair is solved as a
    /// 2x2 linear system with Cramer's rule. Monotone curves cross at most
    /// once, but noisy data can produce several crossings, in which case
    /// the lowest price wins.
    ///
    /// Returns `None` when no crossing exists inside the shared price range,
    /// including when either curve has fewer than two points.
    pub fn intersect(first: &PriceCurve, second: &PriceCurve) -> Option<f64> {
        let mut lowest: Option<f64> = None;

        for (a_start, a_end) in first.segments() {
            for (b_start, b_end) in second.segments() {
                if a_start.price.max(b_start.price) > a_end.price.min(b_end.price) {
                    continue;
                }
                if let Some(price) = segment_crossing(a_start, a_end, b_start, b_end) {
                    lowest = Some(lowest.map_or(price, |current| current.min(price)));
                }
            }
        }

        lowest
    }
}

/// Solves for the crossing of segments p1-p2 and p3-p4.
///
/// Caller guarantees the price ranges of the two segments overlap.
fn segment_crossing(p1: CurvePoint, p2: CurvePoint, p3: CurvePoint, p4: CurvePoint) -> Option<f64> {
    let (x1, y1, x2, y2) = (p1.price, p1.percentage, p2.price, p2.percentage);
    let (x3, y3, x4, y4) = (p3.price, p3.percentage, p4.price, p4.percentage);

    let denominator = (x1 - x2) * (y3 - y4) - (y1 - y2) * (x3 - x4);

    if denominator.abs() < EPSILON {
        // Parallel: they only meet if collinear, first touching where the overlap starts.
        let cross = (x3 - x1) * (y2 - y1) - (y3 - y1) * (x2 - x1);
        return (cross.abs() < EPSILON).then(|| x1.max(x3));
    }

    let t = ((x1 - x3) * (y3 - y4) - (y1 - y3) * (x3 - x4)) / denominator;
    let u = -((x1 - x2) * (y1 - y3) - (y1 - y2) * (x1 - x3)) / denominator;

    (within_unit(t) && within_unit(u)).then(|| x1 + t * (x2 - x1))
}

fn within_unit(value: f64) -> bool {
    (-EPSILON..=1.0 + EPSILON).contains(&value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::curve::{CumulativeDirection, PriceCurveBuilder};

    fn curve(points: &[(f64, f64)]) -> PriceCurve {
        PriceCurve::from_points(
            CumulativeDirection::Ascending,
            points.iter().map(|&(p, pct)| CurvePoint::new(p, pct)).collect(),
        )
    }

    fn assert_close(actual: Option<f64>, expected: f64) {
        let actual = actual.expect("expected an intersection");
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    #[test]
    fn crossing_lines_meet_in_the_middle() {
        let falling = curve(&[(10.0, 100.0), (20.0, 0.0)]);
        let rising = curve(&[(10.0, 0.0), (20.0, 100.0)]);
        assert_close(IntersectionSolver::intersect(&falling, &rising), 15.0);
        assert_close(IntersectionSolver::intersect(&rising, &falling), 15.0);
    }

    #[test]
    fn disjoint_price_ranges_have_no_intersection() {
        let low = curve(&[(1.0, 100.0), (5.0, 0.0)]);
        let high = curve(&[(10.0, 0.0), (20.0, 100.0)]);
        assert_eq!(IntersectionSolver::intersect(&low, &high), None);
    }

    #[test]
    fn overlapping_but_non_crossing_curves_have_no_intersection() {
        let above = curve(&[(10.0, 80.0), (20.0, 90.0)]);
        let below = curve(&[(10.0, 10.0), (20.0, 20.0)]);
        assert_eq!(IntersectionSolver::intersect(&above, &below), None);
    }

    #[test]
    fn single_point_curves_never_intersect() {
        let point = curve(&[(15.0, 50.0)]);
        let line = curve(&[(10.0, 0.0), (20.0, 100.0)]);
        assert_eq!(IntersectionSolver::intersect(&point, &line), None);
        assert_eq!(IntersectionSolver::intersect(&line, &point), None);
        assert_eq!(IntersectionSolver::intersect(&point, &point), None);
    }

    #[test]
    fn lowest_of_several_crossings_is_returned() {
        let zigzag = curve(&[(0.0, 0.0), (10.0, 10.0), (20.0, 0.0), (30.0, 10.0)]);
        let flat = curve(&[(0.0, 5.0), (30.0, 5.0)]);
        assert_close(IntersectionSolver::intersect(&zigzag, &flat), 5.0);
        assert_close(IntersectionSolver::intersect(&flat, &zigzag), 5.0);
    }

    #[test]
    fn shared_endpoint_counts_as_crossing() {
        let falling = curve(&[(0.0, 100.0), (10.0, 50.0)]);
        let rising = curve(&[(10.0, 50.0), (20.0, 100.0)]);
        assert_close(IntersectionSolver::intersect(&falling, &rising), 10.0);
    }

    #[test]
    fn collinear_overlap_touches_at_start_of_overlap() {
        let a = curve(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = curve(&[(5.0, 5.0), (15.0, 15.0)]);
        assert_close(IntersectionSolver::intersect(&a, &b), 5.0);
    }

    #[test]
    fn parallel_distinct_segments_do_not_cross() {
        let a = curve(&[(0.0, 0.0), (10.0, 10.0)]);
        let b = curve(&[(0.0, 5.0), (10.0, 15.0)]);
        assert_eq!(IntersectionSolver::intersect(&a, &b), None);
    }

    #[test]
    fn built_curves_cross_between_survey_prices() {
        let too_cheap = PriceCurveBuilder::build(
            &[5.0, 8.0, 10.0, 12.0, 15.0, 18.0, 20.0, 22.0, 25.0, 28.0],
            CumulativeDirection::Descending,
        );
        let too_expensive = PriceCurveBuilder::build(
            &[25.0, 28.0, 30.0, 32.0, 35.0, 38.0, 40.0, 45.0, 50.0, 55.0],
            CumulativeDirection::Ascending,
        );
        assert_close(IntersectionSolver::intersect(&too_cheap, &too_expensive), 26.5);
    }
}
