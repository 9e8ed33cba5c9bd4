//! Survey repository port.
//!
//! Defines the contract for persisting price survey responses and loading
//! them back per product for analysis.
//!
//! # Design
//!
//! - **Append-only**: responses are never updated once saved
//! - **Product-scoped**: all reads are by product id

use crate::domain::foundation::{DomainError, ProductId};
use crate::domain::survey::PriceSurveyResponse;
use async_trait::async_trait;

/// Repository port for survey responses.
#[async_trait]
pub trait SurveyRepository: Send + Sync {
    /// Persist a completed response.
    ///
    /// # Errors
    ///
    /// - `DatabaseError` on persistence failure
    async fn save(&self, response: &PriceSurveyResponse) -> Result<(), DomainError>;

    /// All responses recorded for a product, oldest first.
    ///
    /// Returns an empty vector when the product has no responses.
    async fn find_by_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<PriceSurveyResponse>, DomainError>;

    /// Number of responses recorded for a product.
    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError>;
}
