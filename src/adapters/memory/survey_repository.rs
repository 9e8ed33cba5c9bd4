//! In-Memory Survey Repository Adapter
//!
//! Stores survey responses in memory, grouped by product.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ProductId};
use crate::domain::survey::PriceSurveyResponse;
use crate::ports::SurveyRepository;

/// In-memory storage for survey responses
#[derive(Debug, Clone, Default)]
pub struct InMemorySurveyRepository {
    responses: Arc<RwLock<HashMap<ProductId, Vec<PriceSurveyResponse>>>>,
}

impl InMemorySurveyRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear all stored responses (useful for tests)
    pub async fn clear(&self) {
        self.responses.write().await.clear();
    }

    /// Total number of stored responses across all products
    pub async fn len(&self) -> usize {
        self.responses.read().await.values().map(Vec::len).sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SurveyRepository for InMemorySurveyRepository {
    async fn save(&self, response: &PriceSurveyResponse) -> Result<(), DomainError> {
        let mut responses = self.responses.write().await;
        responses
            .entry(response.product_id.clone())
            .or_default()
            .push(response.clone());
        Ok(())
    }

    async fn find_by_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<PriceSurveyResponse>, DomainError> {
        let responses = self.responses.read().await;
        Ok(responses.get(product_id).cloned().unwrap_or_default())
    }

    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError> {
        let responses = self.responses.read().await;
        Ok(responses.get(product_id).map_or(0, |r| r.len() as u64))
    }
}
