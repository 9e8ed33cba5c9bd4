//! Price Sensitivity - Van Westendorp price sensitivity surveys and analysis.
//!
//! Respondents answer four price questions per product; once enough
//! responses exist, the cumulative answer curves are intersected to derive
//! an optimal price, an indifference price and an acceptable price range.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
