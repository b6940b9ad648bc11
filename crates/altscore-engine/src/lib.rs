//! # altscore-engine: alternative-data credit scoring.
//!
//! Scoring runs in four stages over a validated
//! [`CreditInputs`](altscore_core::types::CreditInputs) record:
//! - **Normalization**: each raw signal is divided by its cap and saturates
//!   at 1.0. The ensemble variant log-dampens transactions.
//! - **Aggregation**: normalized signals are weighted and summed. The
//!   ensemble variant adds interaction and consistency bonuses plus a bounded
//!   random perturbation, then estimates confidence and default probability.
//! - **Policy**: the rescaled score selects a risk tier (and, for the
//!   ensemble variant, loan terms) from the configured band table.
//! - **Explainability**: every feature gets its static importance and an
//!   impact label relative to a reference average.

pub mod engine;
pub mod explain;
pub mod features;
pub mod normalize;
pub mod policy;
pub mod variance;

pub use engine::ScoringEngine;
pub use variance::{FixedVariance, NoVariance, RngVariance};
