//! SurveyCollector - the four-question price survey wizard.
//!
//! Walks one respondent through the questions in asking order and refuses
//! any answer that is not a positive finite price at least as high as every
//! answer already accepted. A refused answer leaves the step unchanged so
//! the respondent can retry. Abandoning discards everything.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::question::{check_order, validate_price};
use super::{PriceAnswers, PriceQuestion, PriceSurveyResponse, SurveyError};
use crate::domain::foundation::{CurrencyCode, ProductId, StateMachine};

/// Wizard step: one per question, then a terminal outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SurveyStep {
    TooCheap,
    Cheap,
    Expensive,
    TooExpensive,
    Complete,
    Abandoned,
}

impl SurveyStep {
    /// The question asked at this step, if the step is not terminal.
    pub fn question(&self) -> Option<PriceQuestion> {
        match self {
            SurveyStep::TooCheap => Some(PriceQuestion::TooCheap),
            SurveyStep::Cheap => Some(PriceQuestion::Cheap),
            SurveyStep::Expensive => Some(PriceQuestion::Expensive),
            SurveyStep::TooExpensive => Some(PriceQuestion::TooExpensive),
            SurveyStep::Complete | SurveyStep::Abandoned => None,
        }
    }

    fn asking(question: PriceQuestion) -> Self {
        match question {
            PriceQuestion::TooCheap => SurveyStep::TooCheap,
            PriceQuestion::Cheap => SurveyStep::Cheap,
            PriceQuestion::Expensive => SurveyStep::Expensive,
            PriceQuestion::TooExpensive => SurveyStep::TooExpensive,
        }
    }

    /// Step that follows a successful answer to `question`.
    fn after(question: PriceQuestion) -> Self {
        question.next().map(Self::asking).unwrap_or(SurveyStep::Complete)
    }
}

impl StateMachine for SurveyStep {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SurveyStep::*;
        matches!(
            (self, target),
            (TooCheap, Cheap)
                | (Cheap, Expensive)
                | (Expensive, TooExpensive)
                | (TooExpensive, Complete)
                | (TooCheap | Cheap | Expensive | TooExpensive, Abandoned)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SurveyStep::*;
        match self {
            TooCheap => vec![Cheap, Abandoned],
            Cheap => vec![Expensive, Abandoned],
            Expensive => vec![TooExpensive, Abandoned],
            TooExpensive => vec![Complete, Abandoned],
            Complete | Abandoned => vec![],
        }
    }
}

/// One respondent's in-progress survey for one product.
#[derive(Debug, Clone)]
pub struct SurveyCollector {
    product_id: ProductId,
    currency: CurrencyCode,
    step: SurveyStep,
    accepted: Vec<(PriceQuestion, f64)>,
}

impl SurveyCollector {
    /// Starts a session at the first question.
    pub fn new(product_id: ProductId, currency: CurrencyCode) -> Self {
        Self {
            product_id,
            currency,
            step: SurveyStep::TooCheap,
            accepted: Vec::with_capacity(PriceQuestion::ALL.len()),
        }
    }

    pub fn product_id(&self) -> &ProductId {
        &self.product_id
    }

    pub fn currency(&self) -> &CurrencyCode {
        &self.currency
    }

    pub fn step(&self) -> SurveyStep {
        self.step
    }

    /// The question awaiting an answer, or `None` once terminal.
    pub fn current_question(&self) -> Option<PriceQuestion> {
        self.step.question()
    }

    /// Answers accepted so far, in asking order.
    pub fn answered(&self) -> &[(PriceQuestion, f64)] {
        &self.accepted
    }

    /// Submits an answer to the current question.
    ///
    /// Returns the new step on success. On failure the session is untouched.
    pub fn answer(&mut self, value: f64) -> Result<SurveyStep, SurveyError> {
        let question = self.current_question().ok_or_else(|| {
            SurveyError::invalid_state(format!("cannot answer a survey in step {:?}", self.step))
        })?;

        let value = validate_price(question, value)?;
        check_order(question, value, &self.accepted)?;

        let next = self
            .step
            .transition_to(SurveyStep::after(question))
            .map_err(|e| SurveyError::invalid_state(e.to_string()))?;

        self.accepted.push((question, value));
        self.step = next;

        debug!(
            product_id = %self.product_id,
            question = %question,
            value,
            next_step = ?next,
            "Accepted survey answer"
        );

        Ok(next)
    }

    /// Abandons the session, discarding every partial answer.
    pub fn abandon(&mut self) -> Result<(), SurveyError> {
        self.step = self
            .step
            .transition_to(SurveyStep::Abandoned)
            .map_err(|e| SurveyError::invalid_state(e.to_string()))?;
        self.accepted.clear();

        debug!(product_id = %self.product_id, "Survey abandoned");
        Ok(())
    }

    /// Consumes a completed session and yields the validated response.
    pub fn into_response(self) -> Result<PriceSurveyResponse, SurveyError> {
        if self.step != SurveyStep::Complete {
            return Err(SurveyError::Incomplete(self.step));
        }

        let answers = match self.accepted.as_slice() {
            [(_, too_cheap), (_, cheap), (_, expensive), (_, too_expensive)] => {
                PriceAnswers::new(*too_cheap, *cheap, *expensive, *too_expensive)
            }
            _ => return Err(SurveyError::Incomplete(self.step)),
        };

        PriceSurveyResponse::new(self.product_id, answers, self.currency)
    }
}
