//! PostgreSQL implementation of SurveyRepository.
//!
//! Persists survey responses to the `price_survey_responses` table.

use async_trait::async_trait;
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::warn;

use crate::domain::foundation::{
    CurrencyCode, DomainError, ErrorCode, ProductId, ResponseId, Timestamp,
};
use crate::domain::survey::{PriceAnswers, PriceSurveyResponse};
use crate::ports::SurveyRepository;

/// PostgreSQL implementation of SurveyRepository.
#[derive(Clone)]
pub struct PostgresSurveyRepository {
    pool: PgPool,
}

impl PostgresSurveyRepository {
    /// Creates a new PostgresSurveyRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SurveyRepository for PostgresSurveyRepository {
    async fn save(&self, response: &PriceSurveyResponse) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO price_survey_responses (
                id, product_id, too_cheap, cheap, expensive, too_expensive,
                currency, submitted_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(response.id.as_uuid())
        .bind(response.product_id.as_str())
        .bind(response.answers.too_cheap)
        .bind(response.answers.cheap)
        .bind(response.answers.expensive)
        .bind(response.answers.too_expensive)
        .bind(response.currency.as_str())
        .bind(response.submitted_at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to insert survey response: {}", e),
            )
        })?;

        Ok(())
    }

    async fn find_by_product(
        &self,
        product_id: &ProductId,
    ) -> Result<Vec<PriceSurveyResponse>, DomainError> {
        let rows = sqlx::query(
            r#"
            SELECT id, product_id, too_cheap, cheap, expensive, too_expensive,
                   currency, submitted_at
            FROM price_survey_responses
            WHERE product_id = $1
            ORDER BY submitted_at ASC, id ASC
            "#,
        )
        .bind(product_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::DatabaseError,
                format!("Failed to fetch survey responses: {}", e),
            )
        })?;

        let stored = rows
            .iter()
            .map(read_row)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(decode_rows(stored))
    }

    async fn count_by_product(&self, product_id: &ProductId) -> Result<u64, DomainError> {
        let result: (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM price_survey_responses WHERE product_id = $1")
                .bind(product_id.as_str())
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    DomainError::new(
                        ErrorCode::DatabaseError,
                        format!("Failed to count survey responses: {}", e),
                    )
                })?;

        Ok(result.0.max(0) as u64)
    }
}

fn column<'r, T>(row: &'r PgRow, name: &str) -> Result<T, DomainError>
where
    T: sqlx::Decode<'r, sqlx::Postgres> + sqlx::Type<sqlx::Postgres>,
{
    row.try_get(name).map_err(|e| {
        DomainError::new(
            ErrorCode::DatabaseError,
            format!("Failed to read column {}: {}", name, e),
        )
    })
}

/// One `price_survey_responses` row as plain column values.
#[derive(Debug, Clone, PartialEq)]
struct StoredResponse {
    id: uuid::Uuid,
    product_id: String,
    too_cheap: f64,
    cheap: f64,
    expensive: f64,
    too_expensive: f64,
    currency: String,
    submitted_at: chrono::DateTime<chrono::Utc>,
}

impl StoredResponse {
    /// Restores the domain record without re-checking the answer ordering;
    /// the engine discards unordered responses itself.
    ///
    /// Fails only when an identifier column no longer parses.
    fn into_response(self) -> Result<PriceSurveyResponse, DomainError> {
        Ok(PriceSurveyResponse::restore(
            ResponseId::from_uuid(self.id),
            ProductId::new(self.product_id)?,
            PriceAnswers::new(self.too_cheap, self.cheap, self.expensive, self.too_expensive),
            CurrencyCode::new(self.currency.trim())?,
            Timestamp::from_datetime(self.submitted_at),
        ))
    }
}

/// Restores every decodable row; a corrupt row is logged and skipped so it
/// cannot hide the rest of the product's responses.
fn decode_rows(rows: Vec<StoredResponse>) -> Vec<PriceSurveyResponse> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match row.into_response() {
                Ok(response) => Some(response),
                Err(e) => {
                    warn!(response_id = %id, error = %e, "Skipping undecodable survey response row");
                    None
                }
            }
        })
        .collect()
}

/// Column access failures mean the schema is wrong, so they fail the query.
fn read_row(row: &PgRow) -> Result<StoredResponse, DomainError> {
    Ok(StoredResponse {
        id: column(row, "id")?,
        product_id: column(row, "product_id")?,
        too_cheap: column(row, "too_cheap")?,
        cheap: column(row, "cheap")?,
        expensive: column(row, "expensive")?,
        too_expensive: column(row, "too_expensive")?,
        currency: column(row, "currency")?,
        submitted_at: column(row, "submitted_at")?,
    })
}
