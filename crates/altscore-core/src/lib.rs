//! # altscore-core
//! Foundation types, configuration, and traits for the Altscore engine.
//!
//! - [`types`]: input and result records, feature and tier enums
//! - [`config`]: [`ScoringConfig`](config::ScoringConfig), the single table
//!   of weights, caps, thresholds and loan bands
//! - [`traits`]: [`CreditScorer`](traits::CreditScorer) and
//!   [`VarianceSource`](traits::VarianceSource) seams
//! - [`presets`]: canned demonstration profiles

pub mod config;
pub mod constants;
pub mod error;
pub mod presets;
pub mod traits;
pub mod types;
