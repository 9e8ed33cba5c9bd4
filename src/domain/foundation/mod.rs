//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, identifiers, and error types that form the
//! vocabulary shared by the survey and analysis modules.

mod currency;
mod errors;
mod ids;
mod state_machine;
mod timestamp;

pub use currency::CurrencyCode;
pub use errors::{DomainError, ErrorCode, ValidationError};
pub use ids::{ProductId, ResponseId};
pub use state_machine::StateMachine;
pub use timestamp::Timestamp;
