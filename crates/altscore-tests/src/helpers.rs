//! Shared strategies and fixtures for the integration tests.

use altscore_core::traits::CreditScorer;
use altscore_core::types::{CreditInputs, Feature, ScoreResult, ScoringVariant};
use altscore_engine::{NoVariance, ScoringEngine};
use proptest::prelude::*;

/// Inputs spanning zero, the saturation caps and well beyond them.
///
/// Usage days stay within a month.
pub fn arb_inputs() -> impl Strategy<Value = CreditInputs> {
    (
        0.0f64..120.0,
        0.0f64..300.0,
        0.0f64..20.0,
        0.0f64..15_000.0,
        0.0f64..=31.0,
    )
        .prop_map(|(t, a, b, d, u)| CreditInputs::new(t, a, b, d, u))
}

/// Inputs mixing zeros, ordinary values and finite magnitudes up to
/// `f64::MAX`, where derived sums overflow to infinity.
pub fn arb_extreme_inputs() -> impl Strategy<Value = CreditInputs> {
    let field = || {
        prop_oneof![
            Just(0.0),
            0.0f64..100.0,
            1e300f64..f64::MAX,
            Just(f64::MAX),
        ]
    };
    (field(), field(), field(), field(), field())
        .prop_map(|(t, a, b, d, u)| CreditInputs::new(t, a, b, d, u))
}

pub fn arb_variant() -> impl Strategy<Value = ScoringVariant> {
    prop_oneof![Just(ScoringVariant::Simple), Just(ScoringVariant::Ensemble)]
}

pub fn arb_feature() -> impl Strategy<Value = Feature> {
    proptest::sample::select(Feature::ALL.to_vec())
}

/// Score with the default engine and no ensemble variance.
pub fn score_exact(inputs: &CreditInputs, variant: ScoringVariant) -> ScoreResult {
    match ScoringEngine::default().compute_with(inputs, variant, &mut NoVariance) {
        Ok(result) => result,
        Err(e) => panic!("valid inputs rejected: {e}"),
    }
}
