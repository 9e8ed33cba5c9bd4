//! Sample-size based confidence heuristic.
//!
//! This is deliberately not a statistical confidence interval: the score is
//! a linear ramp from zero respondents to a saturation count, and the bands
//! are product-chosen thresholds for display.

use serde::{Deserialize, Serialize};

/// Qualitative confidence shown to end users.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfidenceBand {
    Low,
    Moderate,
    High,
}

impl ConfidenceBand {
    pub fn label(&self) -> &'static str {
        match self {
            ConfidenceBand::Low => "Low",
            ConfidenceBand::Moderate => "Moderate",
            ConfidenceBand::High => "High",
        }
    }
}

/// Sample sizes at which each band starts; anything below `moderate_from` is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfidenceBands {
    pub moderate_from: usize,
    pub high_from: usize,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            moderate_from: 50,
            high_from: 100,
        }
    }
}

/// Maps a sample size to a confidence score in `[0, 1]` and a band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfidenceEstimator {
    saturation: usize,
    bands: ConfidenceBands,
}

impl ConfidenceEstimator {
    /// Sample size at which the score reaches 1.
    pub const DEFAULT_SATURATION: usize = 100;

    /// Creates an estimator; a zero saturation is treated as one.
    pub fn new(saturation: usize, bands: ConfidenceBands) -> Self {
        Self {
            saturation: saturation.max(1),
            bands,
        }
    }

    pub fn saturation(&self) -> usize {
        self.saturation
    }

    pub fn bands(&self) -> ConfidenceBands {
        self.bands
    }

    /// `min(sample_size / saturation, 1)`.
    pub fn score(&self, sample_size: usize) -> f64 {
        (sample_size as f64 / self.saturation as f64).min(1.0)
    }

    pub fn band(&self, sample_size: usize) -> ConfidenceBand {
        if sample_size >= self.bands.high_from {
            ConfidenceBand::High
        } else if sample_size >= self.bands.moderate_from {
            ConfidenceBand::Moderate
        } else {
            ConfidenceBand::Low
        }
    }
}

impl Default for ConfidenceEstimator {
    fn default() -> Self {
        Self::new(Self::DEFAULT_SATURATION, ConfidenceBands::default())
    }
}
