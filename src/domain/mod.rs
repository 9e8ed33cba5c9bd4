//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, currency, timestamps, errors)
//! - `survey` - Four-question price survey collection and response records
//! - `analysis` - Pure price sensitivity analysis over collected responses

pub mod analysis;
pub mod foundation;
pub mod survey;
