//! In-Memory Analysis Cache Adapter
//!
//! Keeps the latest analysis per product for a fixed time-to-live.
//! Expired entries are treated as absent and evicted when read.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

use crate::domain::analysis::PriceAnalysis;
use crate::domain::foundation::{DomainError, ProductId};
use crate::ports::AnalysisCache;

#[derive(Debug, Clone)]
struct CachedAnalysis {
    analysis: PriceAnalysis,
    stored_at: Instant,
}

/// TTL cache of computed analyses
#[derive(Debug, Clone)]
pub struct InMemoryAnalysisCache {
    ttl: Duration,
    entries: Arc<RwLock<HashMap<ProductId, CachedAnalysis>>>,
}

impl InMemoryAnalysisCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Number of entries held, including ones that have expired but not been read
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

#[async_trait]
impl AnalysisCache for InMemoryAnalysisCache {
    async fn get(&self, product_id: &ProductId) -> Result<Option<PriceAnalysis>, DomainError> {
        {
            let entries = self.entries.read().await;
            match entries.get(product_id) {
                None => return Ok(None),
                Some(entry) if entry.stored_at.elapsed() < self.ttl => {
                    return Ok(Some(entry.analysis.clone()))
                }
                Some(_) => {}
            }
        }

        // Expired: re-check under the write lock, a fresh put may have raced us.
        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(product_id) {
            if entry.stored_at.elapsed() < self.ttl {
                return Ok(Some(entry.analysis.clone()));
            }
            entries.remove(product_id);
        }
        Ok(None)
    }

    async fn put(&self, analysis: &PriceAnalysis) -> Result<(), DomainError> {
        let mut entries = self.entries.write().await;
        entries.insert(
            analysis.product_id.clone(),
            CachedAnalysis {
                analysis: analysis.clone(),
                stored_at: Instant::now(),
            },
        );
        Ok(())
    }

    async fn invalidate(&self, product_id: &ProductId) -> Result<(), DomainError> {
        self.entries.write().await.remove(product_id);
        Ok(())
    }
}
