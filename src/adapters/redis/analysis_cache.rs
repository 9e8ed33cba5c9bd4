//! Redis-backed analysis cache for multi-server deployments.
//!
//! Each product's analysis is stored as JSON under `{prefix}:{product_id}`
//! with `SET ... EX ttl`, so Redis handles expiry. Invalidation is a `DEL`.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::debug;

use crate::config::RedisConfig;
use crate::domain::analysis::PriceAnalysis;
use crate::domain::foundation::{DomainError, ErrorCode, ProductId};
use crate::ports::AnalysisCache;

/// Redis-backed cache of computed analyses.
#[derive(Clone)]
pub struct RedisAnalysisCache {
    conn: MultiplexedConnection,
    key_prefix: String,
    ttl: Duration,
}

impl RedisAnalysisCache {
    /// Create a cache over an existing connection.
    pub fn new(conn: MultiplexedConnection, key_prefix: impl Into<String>, ttl: Duration) -> Self {
        Self {
            conn,
            key_prefix: key_prefix.into(),
            ttl,
        }
    }

    /// Open a multiplexed connection from configuration.
    pub async fn connect(config: &RedisConfig, ttl: Duration) -> Result<Self, DomainError> {
        let client = redis::Client::open(config.url.as_str()).map_err(cache_error)?;
        let conn = tokio::time::timeout(
            config.timeout(),
            client.get_multiplexed_tokio_connection(),
        )
        .await
        .map_err(|_| DomainError::new(ErrorCode::CacheError, "Timed out connecting to Redis"))?
        .map_err(cache_error)?;

        Ok(Self::new(conn, config.key_prefix.clone(), ttl))
    }

    fn key(&self, product_id: &ProductId) -> String {
        cache_key(&self.key_prefix, product_id)
    }
}

/// Redis key for a product's cached analysis.
pub fn cache_key(prefix: &str, product_id: &ProductId) -> String {
    format!("{}:{}", prefix, product_id)
}

fn cache_error(e: redis::RedisError) -> DomainError {
    DomainError::new(ErrorCode::CacheError, format!("Redis error: {}", e))
}

#[async_trait]
impl AnalysisCache for RedisAnalysisCache {
    async fn get(&self, product_id: &ProductId) -> Result<Option<PriceAnalysis>, DomainError> {
        let mut conn = self.conn.clone();
        let raw: Option<String> = conn.get(self.key(product_id)).await.map_err(cache_error)?;

        match raw {
            Some(json) => serde_json::from_str(&json).map(Some).map_err(|e| {
                DomainError::new(
                    ErrorCode::CacheError,
                    format!("Corrupt cached analysis for {}: {}", product_id, e),
                )
            }),
            None => Ok(None),
        }
    }

    async fn put(&self, analysis: &PriceAnalysis) -> Result<(), DomainError> {
        let json = serde_json::to_string(analysis).map_err(|e| {
            DomainError::new(
                ErrorCode::CacheError,
                format!("Failed to serialize analysis: {}", e),
            )
        })?;
        let key = self.key(&analysis.product_id);

        let mut conn = self.conn.clone();
        redis::cmd("SET")
            .arg(&key)
            .arg(json)
            .arg("EX")
            .arg(self.ttl.as_secs().max(1))
            .query_async::<_, ()>(&mut conn)
            .await
            .map_err(cache_error)?;

        debug!(key = %key, ttl_secs = self.ttl.as_secs(), "Cached price analysis");
        Ok(())
    }

    async fn invalidate(&self, product_id: &ProductId) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        conn.del::<_, ()>(self.key(product_id))
            .await
            .map_err(cache_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_are_namespaced_by_prefix() {
        let id = ProductId::new("course-42").unwrap();
        assert_eq!(cache_key("price_analysis", &id), "price_analysis:course-42");
        assert_eq!(cache_key("staging:pa", &id), "staging:pa:course-42");
    }

    #[test]
    fn redis_errors_map_to_cache_error() {
        let err = cache_error(redis::RedisError::from((
            redis::ErrorKind::IoError,
            "connection refused",
        )));
        assert_eq!(err.code, ErrorCode::CacheError);
    }

    // Integration against a live server needs a running Redis:
    // let client = redis::Client::open("redis://localhost:6379").unwrap();
    // let conn = client.get_multiplexed_tokio_connection().await.unwrap();
    // let cache = RedisAnalysisCache::new(conn, "test", Duration::from_secs(5));
}
