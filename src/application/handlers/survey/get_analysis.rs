//! GetAnalysisHandler - Query handler for a product's price analysis.
//!
//! Read-through cache: a cached analysis is returned as is, otherwise all
//! stored responses are loaded, analyzed and the result cached.
//!
//! A submission saves before it invalidates, so one landing while the
//! analysis is computed could have its invalidation overwritten by our `put`.
//! The response count is therefore read before loading and again after
//! caching; any change drops the entry just written.

use std::sync::Arc;

use futures::future::join_all;
use tracing::{debug, warn};

use crate::domain::analysis::{AnalysisError, PriceAnalysis, PriceAnalysisEngine};
use crate::domain::foundation::ProductId;
use crate::ports::{AnalysisCache, SurveyRepository};

/// Query for one product's analysis.
#[derive(Debug, Clone)]
pub struct GetAnalysisQuery {
    pub product_id: ProductId,
}

/// Handler for analysis queries.
pub struct GetAnalysisHandler {
    repository: Arc<dyn SurveyRepository>,
    cache: Arc<dyn AnalysisCache>,
    engine: PriceAnalysisEngine,
}

impl GetAnalysisHandler {
    pub fn new(
        repository: Arc<dyn SurveyRepository>,
        cache: Arc<dyn AnalysisCache>,
        engine: PriceAnalysisEngine,
    ) -> Self {
        Self {
            repository,
            cache,
            engine,
        }
    }

    pub async fn handle(&self, query: GetAnalysisQuery) -> Result<PriceAnalysis, AnalysisError> {
        let product_id = query.product_id;

        match self.cache.get(&product_id).await {
            Ok(Some(cached)) => {
                debug!(product_id = %product_id, "Analysis cache hit");
                return Ok(cached);
            }
            Ok(None) => {}
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Analysis cache read failed, recomputing");
            }
        }

        let stored_before = self.repository.count_by_product(&product_id).await?;
        let responses = self.repository.find_by_product(&product_id).await?;
        let analysis = self.engine.analyze(&product_id, &responses)?;

        match self.cache.put(&analysis).await {
            Ok(()) => self.drop_if_stale(&product_id, stored_before).await,
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Failed to cache analysis");
            }
        }

        Ok(analysis)
    }

    /// Invalidates the entry just cached unless the stored count is unchanged.
    async fn drop_if_stale(&self, product_id: &ProductId, stored_before: u64) {
        match self.repository.count_by_product(product_id).await {
            Ok(stored_now) if stored_now == stored_before => return,
            Ok(stored_now) => {
                debug!(
                    product_id = %product_id,
                    stored_before,
                    stored_now,
                    "Responses arrived during analysis, dropping cached entry"
                );
            }
            Err(e) => {
                warn!(product_id = %product_id, error = %e, "Could not recount responses, dropping cached entry");
            }
        }

        if let Err(e) = self.cache.invalidate(product_id).await {
            warn!(product_id = %product_id, error = %e, "Failed to drop stale cached analysis");
        }
    }

    /// Analyzes several products concurrently; results keep the input order.
    pub async fn handle_many(
        &self,
        product_ids: Vec<ProductId>,
    ) -> Vec<(ProductId, Result<PriceAnalysis, AnalysisError>)> {
        let lookups = product_ids.into_iter().map(|product_id| async move {
            let result = self
                .handle(GetAnalysisQuery {
                    product_id: product_id.clone(),
                })
                .await;
            (product_id, result)
        });

        join_all(lookups).await
    }
}
