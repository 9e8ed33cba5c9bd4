//! The four Van Westendorp price questions and the answers to them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{PriceSurveyResponse, SurveyError};
use crate::domain::foundation::ValidationError;

/// One of the four price questions, in the order respondents are asked.
///
/// The derived ordering follows the asking order, which is also the order
/// in which answers must be non-decreasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PriceQuestion {
    TooCheap,
    Cheap,
    Expensive,
    TooExpensive,
}

impl PriceQuestion {
    /// All questions in asking order.
    pub const ALL: [PriceQuestion; 4] = [
        PriceQuestion::TooCheap,
        PriceQuestion::Cheap,
        PriceQuestion::Expensive,
        PriceQuestion::TooExpensive,
    ];

    /// Zero-based position in the asking order.
    pub fn position(&self) -> usize {
        match self {
            PriceQuestion::TooCheap => 0,
            PriceQuestion::Cheap => 1,
            PriceQuestion::Expensive => 2,
            PriceQuestion::TooExpensive => 3,
        }
    }

    /// The question asked after this one, if any.
    pub fn next(&self) -> Option<Self> {
        Self::ALL.get(self.position() + 1).copied()
    }

    /// Human-readable label used in validation messages.
    pub fn label(&self) -> &'static str {
        match self {
            PriceQuestion::TooCheap => "too cheap",
            PriceQuestion::Cheap => "cheap",
            PriceQuestion::Expensive => "expensive",
            PriceQuestion::TooExpensive => "too expensive",
        }
    }

    /// Field name in the persisted/transmitted response shape.
    pub fn field_name(&self) -> &'static str {
        match self {
            PriceQuestion::TooCheap => "tooCheap",
            PriceQuestion::Cheap => "cheap",
            PriceQuestion::Expensive => "expensive",
            PriceQuestion::TooExpensive => "tooExpensive",
        }
    }

    /// This question's answer within a stored response.
    pub fn value_in(&self, response: &PriceSurveyResponse) -> f64 {
        response.answers.get(*self)
    }
}

impl fmt::Display for PriceQuestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// One respondent's four price thresholds, one required field per question.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceAnswers {
    pub too_cheap: f64,
    pub cheap: f64,
    pub expensive: f64,
    pub too_expensive: f64,
}

impl PriceAnswers {
    pub fn new(too_cheap: f64, cheap: f64, expensive: f64, too_expensive: f64) -> Self {
        Self {
            too_cheap,
            cheap,
            expensive,
            too_expensive,
        }
    }

    /// Returns the answer given to a question.
    pub fn get(&self, question: PriceQuestion) -> f64 {
        match question {
            PriceQuestion::TooCheap => self.too_cheap,
            PriceQuestion::Cheap => self.cheap,
            PriceQuestion::Expensive => self.expensive,
            PriceQuestion::TooExpensive => self.too_expensive,
        }
    }

    /// Checks every value is a positive finite price and that the four
    /// values are non-decreasing in asking order.
    pub fn validate(&self) -> Result<(), SurveyError> {
        let mut accepted: Vec<(PriceQuestion, f64)> = Vec::with_capacity(4);
        for question in PriceQuestion::ALL {
            let value = validate_price(question, self.get(question))?;
            check_order(question, value, &accepted)?;
            accepted.push((question, value));
        }
        Ok(())
    }
}

/// Validates a single price answer in isolation.
pub(crate) fn validate_price(question: PriceQuestion, value: f64) -> Result<f64, SurveyError> {
    if !value.is_finite() {
        return Err(SurveyError::InvalidAnswer {
            question,
            reason: ValidationError::not_finite(question.field_name(), value),
        });
    }
    if value <= 0.0 {
        return Err(SurveyError::InvalidAnswer {
            question,
            reason: ValidationError::not_positive(question.field_name(), value),
        });
    }
    Ok(value)
}

/// Checks a new answer against every previously accepted one.
///
/// Reports the most recent prior answer it falls below; with a
/// non-decreasing history that is the highest, binding constraint.
pub(crate) fn check_order(
    question: PriceQuestion,
    value: f64,
    accepted: &[(PriceQuestion, f64)],
) -> Result<(), SurveyError> {
    match accepted.iter().rev().find(|(_, prior)| value < *prior) {
        Some(&(violated, violated_value)) => Err(SurveyError::PriceOrderViolation {
            question,
            value,
            violated,
            violated_value,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn questions_follow_asking_order() {
        assert_eq!(PriceQuestion::TooCheap.next(), Some(PriceQuestion::Cheap));
        assert_eq!(PriceQuestion::Expensive.next(), Some(PriceQuestion::TooExpensive));
        assert_eq!(PriceQuestion::TooExpensive.next(), None);
        assert!(PriceQuestion::TooCheap < PriceQuestion::TooExpensive);
    }

    #[test]
    fn question_serializes_camel_case() {
        let json = serde_json::to_string(&PriceQuestion::TooExpensive).unwrap();
        assert_eq!(json, "\"tooExpensive\"");
    }

    #[test]
    fn answers_serialize_with_wire_field_names() {
        let answers = PriceAnswers::new(5.0, 10.0, 20.0, 30.0);
        let json = serde_json::to_value(answers).unwrap();
        assert_eq!(json["tooCheap"], 5.0);
        assert_eq!(json["tooExpensive"], 30.0);
    }

    #[test]
    fn ordered_answers_validate() {
        assert!(PriceAnswers::new(5.0, 10.0, 20.0, 30.0).validate().is_ok());
        assert!(PriceAnswers::new(10.0, 10.0, 10.0, 10.0).validate().is_ok());
    }

    #[test]
    fn out_of_order_answers_name_binding_question() {
        let err = PriceAnswers::new(5.0, 10.0, 8.0, 30.0).validate().unwrap_err();
        assert_eq!(
            err,
            SurveyError::PriceOrderViolation {
                question: PriceQuestion::Expensive,
                value: 8.0,
                violated: PriceQuestion::Cheap,
                violated_value: 10.0,
            }
        );
    }

    #[test]
    fn non_positive_and_non_finite_answers_rejected() {
        assert!(matches!(
            PriceAnswers::new(0.0, 10.0, 20.0, 30.0).validate(),
            Err(SurveyError::InvalidAnswer {
                question: PriceQuestion::TooCheap,
                ..
            })
        ));
        assert!(matches!(
            PriceAnswers::new(5.0, 10.0, f64::NAN, 30.0).validate(),
            Err(SurveyError::InvalidAnswer {
                question: PriceQuestion::Expensive,
                ..
            })
        ));
    }
}
