//! Survey module - collecting Van Westendorp price answers.
//!
//! # Components
//!
//! - `PriceQuestion` / `PriceAnswers` - The four questions and a respondent's thresholds
//! - `SurveyCollector` - Step-by-step wizard enforcing non-decreasing answers
//! - `PriceSurveyResponse` - The immutable record handed to storage

mod collector;
mod errors;
mod question;
mod response;

pub use collector::{SurveyCollector, SurveyStep};
pub use errors::SurveyError;
pub use question::{PriceAnswers, PriceQuestion};
pub use response::PriceSurveyResponse;
