//! Property-based invariants of the scoring engine.
//!
//! Covered:
//! - Score range for both variants under any variance
//! - Feature-importance ordering and totals
//! - Monotonicity of the base score and variance-free scores
//! - Determinism of the simple variant
//! - Bounded ensemble variance
//! - Tier/score consistency and loan-term bounds
//! - Concurrent scoring with independent seeded sources

use std::sync::Arc;
use std::thread;

use altscore_core::config::ScoringConfig;
use altscore_core::error::ScoringError;
use altscore_core::traits::CreditScorer;
use altscore_core::types::{RiskTier, ScoringVariant};
use altscore_engine::{NoVariance, RngVariance, ScoringEngine};
use altscore_tests::helpers::{
    arb_extreme_inputs, arb_feature, arb_inputs, arb_variant, score_exact,
};
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn score_within_bounds(inputs in arb_inputs(), variant in arb_variant(), seed in any::<u64>()) {
        let engine = ScoringEngine::default();
        let result = engine
            .compute_with(&inputs, variant, &mut RngVariance::seeded(seed))
            .unwrap();
        prop_assert!((300..=850).contains(&result.score));
        prop_assert!((0.0..=100.0).contains(&result.progress_percent()));
    }

    #[test]
    fn extreme_magnitudes_within_bounds(
        inputs in arb_extreme_inputs(),
        variant in arb_variant(),
        seed in any::<u64>(),
    ) {
        let result = ScoringEngine::default()
            .compute_with(&inputs, variant, &mut RngVariance::seeded(seed))
            .unwrap();
        prop_assert!((300..=850).contains(&result.score), "score = {}", result.score);
        if let Some(probability) = result.probability {
            prop_assert!(probability <= 100);
        }
    }

    #[test]
    fn ensemble_percentages_bounded(inputs in arb_inputs(), seed in any::<u64>()) {
        let result = ScoringEngine::default()
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
            .unwrap();
        prop_assert!(result.confidence.unwrap() <= 100);
        prop_assert!(result.probability.unwrap() <= 100);
        prop_assert!(result.loan_amount.unwrap() >= 0.0);
    }
}

// ---------------------------------------------------------------------------
// Importance
// ---------------------------------------------------------------------------

#[test]
fn default_weights_sum_to_one() {
    let cfg = ScoringConfig::default();
    assert!((cfg.weights.sum() - 1.0).abs() < 1e-9);
    assert!(cfg.validate().is_ok());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn importance_sorted_and_complete(inputs in arb_inputs(), variant in arb_variant()) {
        let rows = score_exact(&inputs, variant).feature_importance;
        prop_assert_eq!(rows.len(), 5);
        for pair in rows.windows(2) {
            prop_assert!(pair[0].importance >= pair[1].importance);
        }
        let total: f64 = rows.iter().map(|r| r.importance).sum();
        prop_assert!((total - 100.0).abs() < 1e-9);
        for row in &rows {
            prop_assert_eq!(row.value, inputs.value(row.feature));
        }
    }

    #[test]
    fn importance_independent_of_variant(inputs in arb_inputs()) {
        let simple = score_exact(&inputs, ScoringVariant::Simple).feature_importance;
        let ensemble = score_exact(&inputs, ScoringVariant::Ensemble).feature_importance;
        prop_assert_eq!(simple, ensemble);
    }
}

// ---------------------------------------------------------------------------
// Monotonicity
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn base_score_non_decreasing(
        inputs in arb_inputs(),
        variant in arb_variant(),
        feature in arb_feature(),
        delta in 0.0f64..500.0,
    ) {
        let engine = ScoringEngine::default();
        let bumped = inputs.with(feature, inputs.value(feature) + delta);
        let before = engine.base_score(&inputs, variant).unwrap();
        let after = engine.base_score(&bumped, variant).unwrap();
        prop_assert!(after >= before, "{feature}: {before} -> {after}");
    }

    #[test]
    fn score_non_decreasing_without_variance(
        inputs in arb_inputs(),
        variant in arb_variant(),
        feature in arb_feature(),
        delta in 0.0f64..500.0,
    ) {
        let bumped = inputs.with(feature, inputs.value(feature) + delta);
        let before = score_exact(&inputs, variant).score;
        let after = score_exact(&bumped, variant).score;
        prop_assert!(after >= before, "{feature}: {before} -> {after}");
    }
}

// ---------------------------------------------------------------------------
// Determinism and variance
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn simple_is_deterministic(inputs in arb_inputs(), seed in any::<u64>()) {
        let engine = ScoringEngine::default();
        let a = engine.compute(&inputs, ScoringVariant::Simple).unwrap();
        let b = engine
            .compute_with(&inputs, ScoringVariant::Simple, &mut RngVariance::seeded(seed))
            .unwrap();
        prop_assert_eq!(a, b);
    }

    #[test]
    fn ensemble_variance_is_bounded(inputs in arb_inputs(), seed in any::<u64>()) {
        let engine = ScoringEngine::default();
        let exact = engine
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut NoVariance)
            .unwrap();
        let noisy = engine
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
            .unwrap();
        // 0.01 * 550 = 5.5 points, plus rounding.
        prop_assert!((i32::from(noisy.score) - i32::from(exact.score)).abs() <= 6);
    }

    #[test]
    fn same_seed_same_ensemble(inputs in arb_inputs(), seed in any::<u64>()) {
        let engine = ScoringEngine::default();
        let a = engine
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
            .unwrap();
        let b = engine
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
            .unwrap();
        prop_assert_eq!(a, b);
    }
}

// ---------------------------------------------------------------------------
// Tiers
// ---------------------------------------------------------------------------

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn simple_tier_matches_thresholds(inputs in arb_inputs()) {
        let result = score_exact(&inputs, ScoringVariant::Simple);
        let expected = match result.score {
            700.. => RiskTier::Low,
            600..=699 => RiskTier::Medium,
            _ => RiskTier::High,
        };
        prop_assert_eq!(result.risk, expected);
        prop_assert!(result.loan_amount.is_none());
        prop_assert!(result.interest_rate.is_none());
    }

    #[test]
    fn ensemble_rate_matches_thresholds(inputs in arb_inputs(), seed in any::<u64>()) {
        let result = ScoringEngine::default()
            .compute_with(&inputs, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
            .unwrap();
        let (risk, rate) = match result.score {
            720.. => (RiskTier::Low, 8.5),
            650..=719 => (RiskTier::Medium, 12.5),
            550..=649 => (RiskTier::Medium, 18.5),
            _ => (RiskTier::High, 25.0),
        };
        prop_assert_eq!(result.risk, risk);
        prop_assert_eq!(result.interest_rate, Some(rate));
        if risk == RiskTier::High {
            prop_assert!(result.loan_amount.unwrap() >= 100.0);
        }
    }
}

// ---------------------------------------------------------------------------
// Rejection
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn negative_field_rejected(
        inputs in arb_inputs(),
        variant in arb_variant(),
        feature in arb_feature(),
        value in -1000.0f64..-1e-9,
    ) {
        let bad = inputs.with(feature, value);
        let err = ScoringEngine::default().compute(&bad, variant).unwrap_err();
        let ScoringError::InvalidInput { field, .. } = err else {
            panic!("expected invalid input, got {err:?}");
        };
        prop_assert_eq!(field, feature.input_field());
    }
}

// ---------------------------------------------------------------------------
// Concurrency
// ---------------------------------------------------------------------------

#[test]
fn concurrent_seeded_scoring_matches_sequential() {
    use rand::{Rng, SeedableRng};

    let mut rng = rand::rngs::StdRng::seed_from_u64(2024);
    let batch: Vec<_> = (0..64)
        .map(|_| {
            altscore_core::types::CreditInputs::new(
                rng.gen_range(0.0..60.0),
                rng.gen_range(0.0..150.0),
                rng.gen_range(0.0..12.0),
                rng.gen_range(0.0..6000.0),
                rng.gen_range(0.0..=31.0),
            )
        })
        .collect();

    let engine = Arc::new(ScoringEngine::default());
    let expected: Vec<_> = (0..8u64)
        .map(|seed| {
            engine
                .compute_batch(&batch, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
                .unwrap()
        })
        .collect();

    let handles: Vec<_> = (0..8u64)
        .map(|seed| {
            let engine = Arc::clone(&engine);
            let batch = batch.clone();
            thread::spawn(move || {
                engine
                    .compute_batch(&batch, ScoringVariant::Ensemble, &mut RngVariance::seeded(seed))
                    .unwrap()
            })
        })
        .collect();

    for (seed, handle) in handles.into_iter().enumerate() {
        assert_eq!(handle.join().unwrap(), expected[seed], "seed {seed}");
    }
}

#[test]
fn concurrent_thread_local_scoring_stays_bounded() {
    let engine = Arc::new(ScoringEngine::default());
    let inputs = altscore_core::presets::Preset::Average.inputs();
    let exact = score_exact(&inputs, ScoringVariant::Ensemble).score;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let engine = Arc::clone(&engine);
            thread::spawn(move || {
                (0..100)
                    .map(|_| engine.compute(&inputs, ScoringVariant::Ensemble).unwrap().score)
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    for handle in handles {
        for score in handle.join().unwrap() {
            assert!((i32::from(score) - i32::from(exact)).abs() <= 6);
        }
    }
}
