//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `memory` - In-process repository and TTL cache
//! - `postgres` - Durable survey storage (sqlx)
//! - `redis` - Shared analysis cache

pub mod memory;
pub mod postgres;
pub mod redis;

pub use memory::{InMemoryAnalysisCache, InMemorySurveyRepository};
pub use postgres::{connect_pool, PostgresSurveyRepository};
pub use self::redis::RedisAnalysisCache;
