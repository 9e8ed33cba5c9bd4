//! A respondent's completed price survey.

use serde::{Deserialize, Serialize};

use super::{PriceAnswers, SurveyError};
use crate::domain::foundation::{CurrencyCode, ProductId, ResponseId, Timestamp};

/// One respondent's answers for one product.
///
/// Created once by the survey wizard and never mutated afterwards. Records
/// read back from storage are rebuilt with [`PriceSurveyResponse::restore`],
/// which does not re-validate, so consumers call [`validate`](Self::validate)
/// before trusting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSurveyResponse {
    pub id: ResponseId,
    pub product_id: ProductId,
    #[serde(flatten)]
    pub answers: PriceAnswers,
    pub currency: CurrencyCode,
    pub submitted_at: Timestamp,
}

impl PriceSurveyResponse {
    /// Creates a validated response stamped with the current time.
    pub fn new(
        product_id: ProductId,
        answers: PriceAnswers,
        currency: CurrencyCode,
    ) -> Result<Self, SurveyError> {
        answers.validate()?;
        Ok(Self {
            id: ResponseId::new(),
            product_id,
            answers,
            currency,
            submitted_at: Timestamp::now(),
        })
    }

    /// Rebuilds a stored response without validation.
    pub fn restore(
        id: ResponseId,
        product_id: ProductId,
        answers: PriceAnswers,
        currency: CurrencyCode,
        submitted_at: Timestamp,
    ) -> Self {
        Self {
            id,
            product_id,
            answers,
            currency,
            submitted_at,
        }
    }

    /// Re-checks the ordering invariant `tooCheap <= cheap <= expensive <= tooExpensive`.
    pub fn validate(&self) -> Result<(), SurveyError> {
        self.answers.validate()
    }
}
