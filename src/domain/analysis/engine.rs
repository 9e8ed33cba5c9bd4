//! PriceAnalysisEngine - Van Westendorp price sensitivity analysis.
//!
//! Builds the four cumulative curves from a product's responses and solves
//! their pairwise intersections. Stateless: every call recomputes from the
//! slice it is given, so one engine can serve concurrent callers.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::curve::{CumulativeDirection, PriceCurve, PriceCurveBuilder};
use super::{
    AcceptablePriceRange, AnalysisError, ConfidenceEstimator, IntersectionSolver, PriceAnalysis,
    PricePointKind,
};
use crate::domain::foundation::{CurrencyCode, ProductId, Timestamp};
use crate::domain::survey::{PriceQuestion, PriceSurveyResponse};

/// Minimum number of usable responses before an analysis is attempted.
pub const DEFAULT_MIN_SAMPLE_SIZE: usize = 10;

/// What to do when a pair of curves never crosses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MissingIntersectionPolicy {
    /// Leave the affected price point absent and still return the analysis.
    #[default]
    Omit,
    /// Fail the whole analysis with `AnalysisError::NoIntersection`.
    Fail,
}

/// Tunables for the engine.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineSettings {
    pub min_sample_size: usize,
    pub missing_intersection: MissingIntersectionPolicy,
    pub confidence: ConfidenceEstimator,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            min_sample_size: DEFAULT_MIN_SAMPLE_SIZE,
            missing_intersection: MissingIntersectionPolicy::default(),
            confidence: ConfidenceEstimator::default(),
        }
    }
}

/// The direction each question's curve accumulates in.
pub fn curve_direction(question: PriceQuestion) -> CumulativeDirection {
    match question {
        PriceQuestion::TooCheap | PriceQuestion::Cheap => CumulativeDirection::Descending,
        PriceQuestion::Expensive | PriceQuestion::TooExpensive => CumulativeDirection::Ascending,
    }
}

/// The four curves of one analysis run, indexed by question.
#[derive(Debug, Clone)]
pub struct SurveyCurves {
    curves: [PriceCurve; 4],
}

impl SurveyCurves {
    pub fn build<'a>(responses: impl IntoIterator<Item = &'a PriceSurveyResponse> + Clone) -> Self {
        let curves = PriceQuestion::ALL.map(|question| {
            let thresholds: Vec<f64> = responses
                .clone()
                .into_iter()
                .map(|r| question.value_in(r))
                .collect();
            PriceCurveBuilder::build(&thresholds, curve_direction(question))
        });
        Self { curves }
    }

    pub fn curve(&self, question: PriceQuestion) -> &PriceCurve {
        &self.curves[question.position()]
    }

    /// Crossing price for one price point kind, unrounded.
    pub fn solve(&self, kind: PricePointKind) -> Option<f64> {
        let (first, second) = kind.curves();
        IntersectionSolver::intersect(self.curve(first), self.curve(second))
    }
}

/// Orchestrates curve building, intersection solving and confidence scoring.
#[derive(Debug, Clone, Default)]
pub struct PriceAnalysisEngine {
    settings: EngineSettings,
}

impl PriceAnalysisEngine {
    pub fn new(settings: EngineSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Analyzes a product's responses, stamped with the current time.
    pub fn analyze(
        &self,
        product_id: &ProductId,
        responses: &[PriceSurveyResponse],
    ) -> Result<PriceAnalysis, AnalysisError> {
        self.analyze_at(product_id, responses, Timestamp::now())
    }

    /// Analyzes a product's responses with an explicit `last_updated` stamp.
    ///
    /// Responses that break the price ordering invariant or belong to
    /// another product are discarded with a warning rather than failing
    /// the run; `sample_size` counts only the responses actually used.
    ///
    /// # Errors
    ///
    /// - `MixedCurrencies` when usable responses disagree on currency
    /// - `InsufficientData` when fewer than `min_sample_size` responses are usable
    /// - `NoIntersection` when a pair of curves never crosses and the
    ///   policy is `Fail`
    pub fn analyze_at(
        &self,
        product_id: &ProductId,
        responses: &[PriceSurveyResponse],
        computed_at: Timestamp,
    ) -> Result<PriceAnalysis, AnalysisError> {
        let usable: Vec<&PriceSurveyResponse> = responses
            .iter()
            .filter(|r| is_usable(product_id, r))
            .collect();

        let currency = uniform_currency(&usable)?;

        let required = self.settings.min_sample_size.max(1);
        let currency = match currency {
            Some(currency) if usable.len() >= required => currency,
            _ => {
                return Err(AnalysisError::InsufficientData {
                    required,
                    actual: usable.len(),
                })
            }
        };

        let curves = SurveyCurves::build(usable.iter().copied());

        let mut prices = [None; 4];
        for (slot, kind) in prices.iter_mut().zip(PricePointKind::ALL) {
            *slot = match curves.solve(kind) {
                Some(price) => Some(currency.round(price)),
                None => {
                    if self.settings.missing_intersection == MissingIntersectionPolicy::Fail {
                        return Err(AnalysisError::NoIntersection { point: kind });
                    }
                    warn!(product_id = %product_id, point = %kind, "Curves do not intersect");
                    None
                }
            };
        }
        let [optimal, indifference, range_min, range_max] = prices;

        let sample_size = usable.len();
        let analysis = PriceAnalysis {
            product_id: product_id.clone(),
            currency,
            sample_size,
            optimal_price_point: optimal,
            indifference_price_point: indifference,
            acceptable_price_range: AcceptablePriceRange {
                min: range_min,
                max: range_max,
            },
            confidence: self.settings.confidence.score(sample_size),
            confidence_band: self.settings.confidence.band(sample_size),
            last_updated: computed_at,
        };

        debug!(
            product_id = %product_id,
            sample_size,
            discarded = responses.len() - sample_size,
            optimal = ?analysis.optimal_price_point,
            indifference = ?analysis.indifference_price_point,
            "Computed price analysis"
        );

        Ok(analysis)
    }
}

fn is_usable(product_id: &ProductId, response: &PriceSurveyResponse) -> bool {
    if response.product_id != *product_id {
        warn!(
            response_id = %response.id,
            expected = %product_id,
            found = %response.product_id,
            "Discarding survey response for another product"
        );
        return false;
    }
    if let Err(e) = response.validate() {
        warn!(response_id = %response.id, error = %e, "Discarding invalid survey response");
        return false;
    }
    true
}

/// The shared currency of the responses, `None` when there are none.
fn uniform_currency(
    responses: &[&PriceSurveyResponse],
) -> Result<Option<CurrencyCode>, AnalysisError> {
    let expected = match responses.first() {
        Some(first) => &first.currency,
        None => return Ok(None),
    };

    match responses.iter().find(|r| r.currency != *expected) {
        Some(other) => Err(AnalysisError::MixedCurrencies {
            expected: expected.clone(),
            found: other.currency.clone(),
        }),
        None => Ok(Some(expected.clone())),
    }
}
