//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod survey;

pub use survey::{
    GetAnalysisHandler, GetAnalysisQuery, SubmitSurveyCommand, SubmitSurveyHandler,
    SubmitSurveyResult,
};
