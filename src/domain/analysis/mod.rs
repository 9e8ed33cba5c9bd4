//! Analysis Module - Van Westendorp price sensitivity analysis.
//!
//! Pure, stateless domain services that turn a product's survey responses
//! into derived price points. No I/O happens here; callers load responses
//! through the `SurveyRepository` port and hand them to the engine.
//!
//! # Components
//!
//! - `PriceCurveBuilder` - Cumulative percentage curve per survey question
//! - `IntersectionSolver` - Crossing price of two piecewise-linear curves
//! - `ConfidenceEstimator` - Sample-size confidence score and band
//! - `PriceAnalysisEngine` - Orchestrates the above into a `PriceAnalysis`
//!
//! # Price Points
//!
//! | Point | Curves |
//! |-------|--------|
//! | Optimal price | "too cheap" x "too expensive" |
//! | Indifference price | "cheap" x "expensive" |
//! | Range minimum | "too cheap" x "expensive" |
//! | Range maximum | "cheap" x "too expensive" |

mod confidence;
mod curve;
mod engine;
mod errors;
mod intersection;
mod result;

pub use confidence::{ConfidenceBand, ConfidenceBands, ConfidenceEstimator};
pub use curve::{CumulativeDirection, CurvePoint, PriceCurve, PriceCurveBuilder};
pub use engine::{
    curve_direction, EngineSettings, MissingIntersectionPolicy, PriceAnalysisEngine, SurveyCurves,
    DEFAULT_MIN_SAMPLE_SIZE,
};
pub use errors::AnalysisError;
pub use intersection::IntersectionSolver;
pub use result::{AcceptablePriceRange, PriceAnalysis, PricePointKind};
