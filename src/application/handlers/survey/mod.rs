//! Survey command and query handlers.

mod get_analysis;
mod submit_survey;

pub use get_analysis::{GetAnalysisHandler, GetAnalysisQuery};
pub use submit_survey::{SubmitSurveyCommand, SubmitSurveyHandler, SubmitSurveyResult};
