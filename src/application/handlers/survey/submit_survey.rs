//! SubmitSurveyHandler - Command handler for recording a completed survey.

use std::sync::Arc;

use tracing::{info, warn};

use crate::domain::foundation::{CurrencyCode, ProductId, ResponseId};
use crate::domain::survey::{PriceAnswers, PriceQuestion, SurveyCollector, SurveyError};
use crate::ports::{AnalysisCache, SurveyRepository};

/// Command to submit one respondent's four answers.
#[derive(Debug, Clone)]
pub struct SubmitSurveyCommand {
    pub product_id: ProductId,
    pub currency: CurrencyCode,
    pub answers: PriceAnswers,
}

/// Result of an accepted submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmitSurveyResult {
    pub response_id: ResponseId,
}

/// Handler for survey submissions.
pub struct SubmitSurveyHandler {
    repository: Arc<dyn SurveyRepository>,
    cache: Arc<dyn AnalysisCache>,
}

impl SubmitSurveyHandler {
    pub fn new(repository: Arc<dyn SurveyRepository>, cache: Arc<dyn AnalysisCache>) -> Self {
        Self { repository, cache }
    }

    pub async fn handle(&self, cmd: SubmitSurveyCommand) -> Result<SubmitSurveyResult, SurveyError> {
        // 1. Replay the answers through the collector so a bulk submission
        //    is held to the same checks as the interactive flow.
        let mut collector = SurveyCollector::new(cmd.product_id.clone(), cmd.currency);
        for question in PriceQuestion::ALL {
            collector.answer(cmd.answers.get(question))?;
        }
        let response = collector.into_response()?;

        // 2. Persist
        self.repository.save(&response).await?;

        // 3. The cached analysis is now stale; a failure here only delays freshness.
        if let Err(e) = self.cache.invalidate(&cmd.product_id).await {
            warn!(product_id = %cmd.product_id, error = %e, "Failed to invalidate cached analysis");
        }

        info!(
            product_id = %cmd.product_id,
            response_id = %response.id,
            "Survey response recorded"
        );

        Ok(SubmitSurveyResult {
            response_id: response.id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::PriceAnalysis;
    use crate::domain::foundation::{DomainError, ErrorCode};
    use crate::domain::survey::PriceSurveyResponse;
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct MockSurveyRepository {
        saved: Mutex<Vec<PriceSurveyResponse>>,
        fail_save: bool,
    }

    impl MockSurveyRepository {
        fn new() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: false,
            }
        }

        fn failing() -> Self {
            Self {
                saved: Mutex::new(Vec::new()),
                fail_save: true,
            }
        }

        fn saved(&self) -> Vec<PriceSurveyResponse> {
            self.saved.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl SurveyRepository for MockSurveyRepository {
        async fn save(&self, response: &PriceSurveyResponse) -> Result<(), DomainError> {
            if self.fail_save {
                return Err(DomainError::new(
                    ErrorCode::DatabaseError,
                    "Simulated save failure",
                ));
            }
            self.saved.lock().unwrap().push(response.clone());
            Ok(())
        }

        async fn find_by_product(
            &self,
            _product_id: &ProductId,
        ) -> Result<Vec<PriceSurveyResponse>, DomainError> {
            Ok(self.saved())
        }

        async fn count_by_product(&self, _product_id: &ProductId) -> Result<u64, DomainError> {
            Ok(self.saved.lock().unwrap().len() as u64)
        }
    }

    struct MockAnalysisCache {
        invalidated: Mutex<Vec<ProductId>>,
        fail: bool,
    }

    impl MockAnalysisCache {
        fn new() -> Self {
            Self {
                invalidated: Mutex::new(Vec::new()),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                invalidated: Mutex::new(Vec::new()),
                fail: true,
            }
        }

        fn invalidated(&self) -> Vec<ProductId> {
            self.invalidated.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl AnalysisCache for MockAnalysisCache {
        async fn get(&self, _product_id: &ProductId) -> Result<Option<PriceAnalysis>, DomainError> {
            Ok(None)
        }

        async fn put(&self, _analysis: &PriceAnalysis) -> Result<(), DomainError> {
            Ok(())
        }

        async fn invalidate(&self, product_id: &ProductId) -> Result<(), DomainError> {
            if self.fail {
                return Err(DomainError::new(ErrorCode::CacheError, "Simulated cache outage"));
            }
            self.invalidated.lock().unwrap().push(product_id.clone());
            Ok(())
        }
    }

    fn command(tc: f64, c: f64, e: f64, te: f64) -> SubmitSurveyCommand {
        SubmitSurveyCommand {
            product_id: ProductId::new("course-42").unwrap(),
            currency: CurrencyCode::new("EUR").unwrap(),
            answers: PriceAnswers::new(tc, c, e, te),
        }
    }

    #[tokio::test]
    async fn accepts_ordered_answers() {
        let repo = Arc::new(MockSurveyRepository::new());
        let cache = Arc::new(MockAnalysisCache::new());
        let handler = SubmitSurveyHandler::new(repo.clone(), cache.clone());

        let result = handler.handle(command(10.0, 15.0, 25.0, 30.0)).await.unwrap();

        let saved = repo.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].id, result.response_id);
        assert_eq!(saved[0].answers, PriceAnswers::new(10.0, 15.0, 25.0, 30.0));
        assert_eq!(cache.invalidated(), vec![ProductId::new("course-42").unwrap()]);
    }

    #[tokio::test]
    async fn accepts_equal_adjacent_answers() {
        let repo = Arc::new(MockSurveyRepository::new());
        let handler = SubmitSurveyHandler::new(repo.clone(), Arc::new(MockAnalysisCache::new()));

        assert!(handler.handle(command(20.0, 20.0, 20.0, 20.0)).await.is_ok());
        assert_eq!(repo.saved().len(), 1);
    }

    #[tokio::test]
    async fn rejects_out_of_order_answers_without_saving() {
        let repo = Arc::new(MockSurveyRepository::new());
        let cache = Arc::new(MockAnalysisCache::new());
        let handler = SubmitSurveyHandler::new(repo.clone(), cache.clone());

        let result = handler.handle(command(20.0, 15.0, 25.0, 30.0)).await;

        match result {
            Err(SurveyError::PriceOrderViolation {
                question, violated, ..
            }) => {
                assert_eq!(question, PriceQuestion::Cheap);
                assert_eq!(violated, PriceQuestion::TooCheap);
            }
            other => panic!("expected order violation, got {:?}", other),
        }
        assert!(repo.saved().is_empty());
        assert!(cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn rejects_non_positive_answers() {
        let handler = SubmitSurveyHandler::new(
            Arc::new(MockSurveyRepository::new()),
            Arc::new(MockAnalysisCache::new()),
        );

        let result = handler.handle(command(0.0, 15.0, 25.0, 30.0)).await;
        assert!(matches!(
            result,
            Err(SurveyError::InvalidAnswer {
                question: PriceQuestion::TooCheap,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn save_failure_is_reported() {
        let cache = Arc::new(MockAnalysisCache::new());
        let handler =
            SubmitSurveyHandler::new(Arc::new(MockSurveyRepository::failing()), cache.clone());

        let result = handler.handle(command(10.0, 15.0, 25.0, 30.0)).await;
        assert!(matches!(result, Err(SurveyError::Infrastructure(_))));
        assert!(cache.invalidated().is_empty());
    }

    #[tokio::test]
    async fn cache_failure_does_not_reject_submission() {
        let repo = Arc::new(MockSurveyRepository::new());
        let handler =
            SubmitSurveyHandler::new(repo.clone(), Arc::new(MockAnalysisCache::failing()));

        assert!(handler.handle(command(10.0, 15.0, 25.0, 30.0)).await.is_ok());
        assert_eq!(repo.saved().len(), 1);
    }
}
