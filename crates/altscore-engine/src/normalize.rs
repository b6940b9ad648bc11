//! Feature normalization and weighted aggregation.
//!
//! Each raw value maps to `min(raw / cap, 1)`, clamped into `[0, 1]`. The
//! ensemble variant then applies `log1p(x) / log1p(1)` to transactions only,
//! which keeps `[0, 1]` and monotonicity but compresses heavy-tailed counts.

use std::f64::consts::LN_2;

use altscore_core::config::{FeatureCaps, FeatureWeights};
use altscore_core::types::{CreditInputs, Feature, PerFeature, ScoringVariant};

/// `log1p(x) / log1p(1)`. Maps `[0, 1]` onto `[0, 1]`.
pub fn log_dampen(x: f64) -> f64 {
    x.ln_1p() / LN_2
}

/// Linear normalization against a cap, saturating at 1.0.
pub fn saturate(raw: f64, cap: f64) -> f64 {
    (raw / cap).clamp(0.0, 1.0)
}

/// Normalize all five features for the given variant.
pub fn normalize(
    inputs: &CreditInputs,
    caps: &FeatureCaps,
    variant: ScoringVariant,
) -> PerFeature<f64> {
    caps.map(|feature, cap| {
        let linear = saturate(inputs.value(feature), *cap);
        match (variant, feature) {
            (ScoringVariant::Ensemble, Feature::Transactions) => log_dampen(linear),
            _ => linear,
        }
    })
}

/// `Σ normalized_i × weight_i`.
pub fn weighted_sum(normalized: &PerFeature<f64>, weights: &FeatureWeights) -> f64 {
    normalized
        .iter()
        .map(|(feature, value)| value * weights.get(feature))
        .sum()
}
