//! Analysis configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::domain::analysis::{
    ConfidenceBands, ConfidenceEstimator, EngineSettings, MissingIntersectionPolicy,
    DEFAULT_MIN_SAMPLE_SIZE,
};

/// Analysis engine and cache tuning
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisConfig {
    /// Usable responses required before an analysis is produced
    #[serde(default = "default_min_sample_size")]
    pub min_sample_size: usize,

    /// Sample size at which confidence reaches 1.0
    #[serde(default = "default_confidence_saturation")]
    pub confidence_saturation: usize,

    /// Sample size at which the band becomes "moderate"
    #[serde(default = "default_moderate_confidence_from")]
    pub moderate_confidence_from: usize,

    /// Sample size at which the band becomes "high"
    #[serde(default = "default_high_confidence_from")]
    pub high_confidence_from: usize,

    /// `omit` or `fail` when two curves never cross
    #[serde(default)]
    pub missing_intersection: MissingIntersectionPolicy,

    /// Seconds a cached analysis stays fresh
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,
}

impl AnalysisConfig {
    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl_secs)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.min_sample_size == 0 {
            return Err(ValidationError::MustBePositive("analysis.min_sample_size"));
        }
        if self.confidence_saturation == 0 {
            return Err(ValidationError::MustBePositive("analysis.confidence_saturation"));
        }
        if self.cache_ttl_secs == 0 {
            return Err(ValidationError::MustBePositive("analysis.cache_ttl_secs"));
        }
        if self.moderate_confidence_from > self.high_confidence_from {
            return Err(ValidationError::InvalidConfidenceBands);
        }
        Ok(())
    }
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_sample_size: default_min_sample_size(),
            confidence_saturation: default_confidence_saturation(),
            moderate_confidence_from: default_moderate_confidence_from(),
            high_confidence_from: default_high_confidence_from(),
            missing_intersection: MissingIntersectionPolicy::default(),
            cache_ttl_secs: default_cache_ttl(),
        }
    }
}

impl From<&AnalysisConfig> for EngineSettings {
    fn from(config: &AnalysisConfig) -> Self {
        EngineSettings {
            min_sample_size: config.min_sample_size,
            missing_intersection: config.missing_intersection,
            confidence: ConfidenceEstimator::new(
                config.confidence_saturation,
                ConfidenceBands {
                    moderate_from: config.moderate_confidence_from,
                    high_from: config.high_confidence_from,
                },
            ),
        }
    }
}

fn default_min_sample_size() -> usize {
    DEFAULT_MIN_SAMPLE_SIZE
}

fn default_confidence_saturation() -> usize {
    ConfidenceEstimator::DEFAULT_SATURATION
}

fn default_moderate_confidence_from() -> usize {
    50
}

fn default_high_confidence_from() -> usize {
    100
}

fn default_cache_ttl() -> u64 {
    300
}
