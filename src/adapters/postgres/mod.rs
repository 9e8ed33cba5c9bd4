//! PostgreSQL adapters - Database implementations for repository ports.
//!
//! - `PostgresSurveyRepository` - Durable survey response storage
//! - `connect_pool` - Pool construction with optional migrations

mod pool;
mod survey_repository;

pub use pool::connect_pool;
pub use survey_repository::PostgresSurveyRepository;
