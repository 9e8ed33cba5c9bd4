//! Survey-specific error types.

use thiserror::Error;

use super::{PriceQuestion, SurveyStep};
use crate::domain::foundation::{DomainError, ErrorCode, ValidationError};

/// Errors raised while collecting or submitting a price survey.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SurveyError {
    /// The value is not a usable price (non-finite or not above zero).
    #[error("Invalid answer for the \"{question}\" price: {reason}")]
    InvalidAnswer {
        question: PriceQuestion,
        reason: ValidationError,
    },

    /// The value is lower than an earlier answer in the same session.
    #[error("this price should be at least the \"{violated}\" price")]
    PriceOrderViolation {
        question: PriceQuestion,
        value: f64,
        violated: PriceQuestion,
        violated_value: f64,
    },

    /// The session cannot accept this action in its current step.
    #[error("Invalid survey state: {0}")]
    InvalidState(String),

    /// A response was requested before all four answers were accepted.
    #[error("Survey is incomplete, current step is {0:?}")]
    Incomplete(SurveyStep),

    /// Storage failed while persisting the response.
    #[error("Error: {0}")]
    Infrastructure(String),
}

impl SurveyError {
    pub fn invalid_state(message: impl Into<String>) -> Self {
        SurveyError::InvalidState(message.into())
    }

    pub fn infrastructure(message: impl Into<String>) -> Self {
        SurveyError::Infrastructure(message.into())
    }

    /// Whether the respondent can fix this by re-entering a value.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            SurveyError::InvalidAnswer { .. } | SurveyError::PriceOrderViolation { .. }
        )
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SurveyError::InvalidAnswer { .. } => ErrorCode::ValidationFailed,
            SurveyError::PriceOrderViolation { .. } => ErrorCode::PriceOrderViolation,
            SurveyError::InvalidState(_) => ErrorCode::InvalidStateTransition,
            SurveyError::Incomplete(_) => ErrorCode::SurveyIncomplete,
            SurveyError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for SurveyError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::InvalidStateTransition => SurveyError::InvalidState(err.message),
            _ => SurveyError::Infrastructure(err.to_string()),
        }
    }
}
