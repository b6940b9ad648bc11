//! Per-feature explanation of a score.
//!
//! Importance is the static feature weight as a percentage, so it never
//! varies per request. Impact compares the raw value with a reference
//! average. Rows are sorted by importance on every call rather than listed
//! in a fixed order, so a reweighted config reorders them.

use altscore_core::config::{ImpactThresholds, ScoringConfig};
use altscore_core::types::{CreditInputs, Feature, FeatureImportance, ImpactLabel};

/// Label a raw value by its ratio to the reference average.
///
/// `ratio > 1.2` Strong Positive, `> 0.8` Positive, `> 0.5` Neutral,
/// otherwise Needs Improvement.
pub fn impact_label(value: f64, average: f64, thresholds: &ImpactThresholds) -> ImpactLabel {
    let ratio = value / average;
    if ratio > thresholds.strong_positive {
        ImpactLabel::StrongPositive
    } else if ratio > thresholds.positive {
        ImpactLabel::Positive
    } else if ratio > thresholds.neutral {
        ImpactLabel::Neutral
    } else {
        ImpactLabel::NeedsImprovement
    }
}

/// Build the explanation rows, sorted descending by importance.
///
/// The sort is stable: equal weights keep declaration order.
pub fn explain(inputs: &CreditInputs, config: &ScoringConfig) -> Vec<FeatureImportance> {
    let mut rows: Vec<FeatureImportance> = Feature::ALL
        .into_iter()
        .map(|feature| {
            let value = inputs.value(feature);
            FeatureImportance {
                feature,
                name: feature.label().to_string(),
                importance: config.weight(feature) * 100.0,
                value,
                impact: impact_label(value, *config.reference.get(feature), &config.impact),
            }
        })
        .collect();
    rows.sort_by(|a, b| b.importance.total_cmp(&a.importance));
    rows
}
