//! Redis adapters for shared, expiring state.

mod analysis_cache;

pub use analysis_cache::{cache_key, RedisAnalysisCache};
