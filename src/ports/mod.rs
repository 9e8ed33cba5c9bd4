//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `SurveyRepository` - Durable storage of survey responses
//! - `AnalysisCache` - Short-lived storage of computed analyses

mod analysis_cache;
mod survey_repository;

pub use analysis_cache::AnalysisCache;
pub use survey_repository::SurveyRepository;
