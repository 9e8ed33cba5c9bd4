//! Analysis-specific error types.

use thiserror::Error;

use super::PricePointKind;
use crate::domain::foundation::{CurrencyCode, DomainError, ErrorCode};

/// Errors raised while computing a price analysis.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// Fewer usable responses than the configured minimum.
    #[error("Insufficient survey data: {actual} usable responses, at least {required} required")]
    InsufficientData { required: usize, actual: usize },

    /// Two curves never cross inside their shared price range.
    #[error("No intersection found for the {point}")]
    NoIntersection { point: PricePointKind },

    /// Usable responses are not all in one currency.
    #[error("Survey responses mix currencies: expected {expected}, found {found}")]
    MixedCurrencies {
        expected: CurrencyCode,
        found: CurrencyCode,
    },

    /// Storage or cache failure while loading responses.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl AnalysisError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        AnalysisError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            AnalysisError::InsufficientData { .. } => ErrorCode::InsufficientData,
            AnalysisError::NoIntersection { .. } => ErrorCode::NoIntersection,
            AnalysisError::MixedCurrencies { .. } => ErrorCode::MixedCurrencies,
            AnalysisError::Infrastructure(_) => ErrorCode::InternalError,
        }
    }
}

impl From<DomainError> for AnalysisError {
    fn from(err: DomainError) -> Self {
        AnalysisError::Infrastructure(err.to_string())
    }
}
