//! Trait interfaces for the Altscore engine.
//!
//! - [`CreditScorer`]: turns a [`CreditInputs`] record into a [`ScoreResult`]
//!   (altscore-engine implements)
//! - [`VarianceSource`]: supplies the ensemble's random perturbation so
//!   callers can seed it or stub it out

use crate::error::ScoringError;
use crate::types::{CreditInputs, ScoreResult, ScoringVariant};

/// Source of the uniform perturbation added to the ensemble score.
///
/// Implementations must return a value in `[-bound, bound]`. A bound of zero
/// must yield zero.
pub trait VarianceSource {
    fn sample(&mut self, bound: f64) -> f64;
}

/// Credit scoring over a fixed-shape input record.
///
/// Scoring is synchronous and CPU-only. A call either returns a fully
/// populated result or fails with [`ScoringError::InvalidInput`].
pub trait CreditScorer: Send + Sync {
    /// Score with a thread-local random source for the ensemble variant.
    ///
    /// The simple variant is pure: identical inputs give identical results.
    fn compute(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
    ) -> Result<ScoreResult, ScoringError>;

    /// Score with an explicit random source.
    ///
    /// The source is consulted at most once per call, and never for
    /// [`ScoringVariant::Simple`].
    fn compute_with(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
        variance: &mut dyn VarianceSource,
    ) -> Result<ScoreResult, ScoringError>;
}
