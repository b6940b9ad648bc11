//! Scoring engine implementing the [`CreditScorer`] trait.
//!
//! One engine serves both variants. They share normalization, weights and
//! explainability; the ensemble variant adds derived bonuses, a bounded
//! random perturbation, loan terms, confidence and default probability.
//! The engine holds only immutable configuration and is `Send + Sync`.

use altscore_core::config::ScoringConfig;
use altscore_core::constants::MAX_USAGE_DAYS;
use altscore_core::error::{ConfigError, ScoringError};
use altscore_core::traits::{CreditScorer, VarianceSource};
use altscore_core::types::{CreditInputs, ScoreResult, ScoringVariant};
use tracing::{debug, trace, warn};

use crate::explain::explain;
use crate::features::{confidence, default_probability, DerivedFeatures};
use crate::normalize::{normalize, weighted_sum};
use crate::policy::{loan_offer, rescale, select_band};
use crate::variance::RngVariance;

/// The production credit scorer.
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl Default for ScoringEngine {
    /// Engine over [`ScoringConfig::global`].
    fn default() -> Self {
        Self {
            config: ScoringConfig::global().clone(),
        }
    }
}

impl ScoringEngine {
    /// Create an engine, rejecting an inconsistent configuration.
    pub fn new(config: ScoringConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Weighted sum of normalized features, before bonuses and rescaling.
    ///
    /// Non-decreasing in every input.
    pub fn base_score(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
    ) -> Result<f64, ScoringError> {
        inputs.validate()?;
        Ok(self.weighted_base(inputs, variant))
    }

    /// Score several records with one variance source.
    ///
    /// All records are validated before any is scored, so an invalid record
    /// fails the whole batch without consuming randomness.
    pub fn compute_batch(
        &self,
        batch: &[CreditInputs],
        variant: ScoringVariant,
        variance: &mut dyn VarianceSource,
    ) -> Result<Vec<ScoreResult>, ScoringError> {
        for inputs in batch {
            inputs.validate()?;
        }
        let results = batch
            .iter()
            .map(|inputs| self.score_validated(inputs, variant, variance))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = results.len(), %variant, "engine: batch scored");
        Ok(results)
    }

    fn weighted_base(&self, inputs: &CreditInputs, variant: ScoringVariant) -> f64 {
        let normalized = normalize(inputs, &self.config.caps, variant);
        weighted_sum(&normalized, &self.config.weights)
    }

    fn score_validated(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
        variance: &mut dyn VarianceSource,
    ) -> Result<ScoreResult, ScoringError> {
        if inputs.phone_usage_days > MAX_USAGE_DAYS {
            warn!(
                phone_usage_days = inputs.phone_usage_days,
                "engine: usage days exceed a month, saturating"
            );
        }

        let result = match variant {
            ScoringVariant::Simple => self.score_simple(inputs)?,
            ScoringVariant::Ensemble => self.score_ensemble(inputs, variance)?,
        };

        debug!(
            %variant,
            score = result.score,
            risk = %result.risk,
            "engine: scored inputs"
        );
        Ok(result)
    }

    fn score_simple(&self, inputs: &CreditInputs) -> Result<ScoreResult, ScoringError> {
        let cfg = &self.config;
        let base = self.weighted_base(inputs, ScoringVariant::Simple);
        let score = rescale(base, cfg.simple_scale, cfg.score_min, cfg.score_max);
        let band = select_band(&cfg.simple_bands, score).ok_or(ScoringError::NoBand {
            table: "simple",
            score,
        })?;

        Ok(ScoreResult {
            variant: ScoringVariant::Simple,
            score,
            risk: band.risk,
            recommendation: band.recommendation.clone(),
            loan_amount: None,
            interest_rate: None,
            confidence: None,
            probability: None,
            feature_importance: explain(inputs, cfg),
        })
    }

    fn score_ensemble(
        &self,
        inputs: &CreditInputs,
        variance: &mut dyn VarianceSource,
    ) -> Result<ScoreResult, ScoringError> {
        let cfg = &self.config;
        let settings = &cfg.ensemble;

        let base = self.weighted_base(inputs, ScoringVariant::Ensemble);
        let derived = DerivedFeatures::from_inputs(inputs, settings);
        trace!(?derived, base, "engine: derived features");

        let bound = settings.variance_bound;
        // Out-of-contract sources are clamped into the bound.
        let perturbation = variance.sample(bound).clamp(-bound, bound);
        let final_score = base + derived.bonus() + perturbation;

        let score = rescale(final_score, settings.scale, cfg.score_min, cfg.score_max);
        let band = select_band(&cfg.loan_bands, score).ok_or(ScoringError::NoBand {
            table: "loan",
            score,
        })?;
        let offer = loan_offer(band, derived.total_spending);

        Ok(ScoreResult {
            variant: ScoringVariant::Ensemble,
            score,
            risk: offer.risk,
            recommendation: offer.recommendation,
            loan_amount: Some(offer.amount),
            interest_rate: Some(offer.interest_rate),
            confidence: Some(confidence(inputs, &derived, settings)),
            probability: Some(default_probability(final_score)),
            feature_importance: explain(inputs, cfg),
        })
    }
}

impl CreditScorer for ScoringEngine {
    fn compute(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
    ) -> Result<ScoreResult, ScoringError> {
        self.compute_with(inputs, variant, &mut RngVariance::thread_local())
    }

    fn compute_with(
        &self,
        inputs: &CreditInputs,
        variant: ScoringVariant,
        variance: &mut dyn VarianceSource,
    ) -> Result<ScoreResult, ScoringError> {
        inputs.validate()?;
        self.score_validated(inputs, variant, variance)
    }
}
