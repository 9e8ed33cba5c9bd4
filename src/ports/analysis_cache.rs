//! Analysis cache port.
//!
//! Holds the most recent `PriceAnalysis` per product so repeated reads do
//! not rebuild curves. Entries are superseded wholesale: a new submission
//! invalidates the product's entry and the next read recomputes it.

use crate::domain::analysis::PriceAnalysis;
use crate::domain::foundation::{DomainError, ProductId};
use async_trait::async_trait;

/// Cache port for computed analyses.
#[async_trait]
pub trait AnalysisCache: Send + Sync {
    /// Cached analysis for a product, or `None` on a miss or expired entry.
    ///
    /// # Errors
    ///
    /// - `CacheError` when the backing store is unreachable or holds garbage
    async fn get(&self, product_id: &ProductId) -> Result<Option<PriceAnalysis>, DomainError>;

    /// Store an analysis, replacing any previous entry for its product.
    async fn put(&self, analysis: &PriceAnalysis) -> Result<(), DomainError>;

    /// Drop the entry for a product. Missing entries are not an error.
    async fn invalidate(&self, product_id: &ProductId) -> Result<(), DomainError>;
}
