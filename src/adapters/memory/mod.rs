//! In-memory adapters for tests, local development and single-node use.

mod analysis_cache;
mod survey_repository;

pub use analysis_cache::InMemoryAnalysisCache;
pub use survey_repository::InMemorySurveyRepository;
