//! Derived features for the ensemble variant.
//!
//! Everything here is computed from raw (un-normalized) inputs.

use altscore_core::config::EnsembleSettings;
use altscore_core::types::{CreditInputs, Feature};

/// Intermediate signals the ensemble adds on top of the weighted sum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    /// Annualized top-up spend: `average_topup × 12`.
    pub total_spending: f64,
    /// Transactions per day: `monthly_transactions / 30`.
    pub transaction_velocity: f64,
    /// `(bills_paid + data_usage / 1000) / 2`.
    pub digital_engagement: f64,
    /// `phone_usage_days / 30`. Not capped; 31 days gives ~1.033.
    pub consistency_score: f64,
    /// `velocity × engagement × 0.1`.
    pub interaction_bonus: f64,
    /// `consistency × 0.05`.
    pub consistency_bonus: f64,
}

impl DerivedFeatures {
    pub fn from_inputs(inputs: &CreditInputs, settings: &EnsembleSettings) -> Self {
        let total_spending = inputs.average_topup * settings.months_per_year;
        let transaction_velocity = inputs.monthly_transactions / settings.days_per_month;
        let digital_engagement = (inputs.bills_paid + inputs.data_usage / settings.mb_per_gb) / 2.0;
        let consistency_score = inputs.phone_usage_days / settings.days_per_month;

        Self {
            total_spending,
            transaction_velocity,
            digital_engagement,
            consistency_score,
            interaction_bonus: product(
                product(transaction_velocity, digital_engagement),
                settings.interaction_factor,
            ),
            consistency_bonus: product(consistency_score, settings.consistency_factor),
        }
    }

    /// Sum of the two bonuses added to the weighted base score.
    pub fn bonus(&self) -> f64 {
        self.interaction_bonus + self.consistency_bonus
    }
}

/// Confidence percentage from input completeness and usage consistency.
///
/// `round((populated / 5 × 0.7 + consistency × 0.3) × 100)`, clamped to
/// `[0, 100]`. Measures how much data was supplied, not statistical
/// confidence.
pub fn confidence(
    inputs: &CreditInputs,
    derived: &DerivedFeatures,
    settings: &EnsembleSettings,
) -> u8 {
    let completeness = inputs.populated_fields() as f64 / Feature::ALL.len() as f64;
    let raw = completeness * settings.completeness_weight
        + derived.consistency_score * settings.consistency_weight;
    percent(raw, 0)
}

/// Nominal default probability: `round((1 − final_score) × 100)`, clamped
/// to `[0, 100]`.
///
/// `final_score` is the pre-rescale aggregate, which bonuses can push above
/// 1.0 and variance below 0. A NaN aggregate reads as certain default.
pub fn default_probability(final_score: f64) -> u8 {
    percent(1.0 - final_score, 100)
}

/// `a × b`, where a zero factor wins over an overflowed one.
///
/// Finite inputs near `f64::MAX` can overflow `engagement` to infinity, and
/// `0 × ∞` is NaN.
fn product(a: f64, b: f64) -> f64 {
    if a == 0.0 || b == 0.0 { 0.0 } else { a * b }
}

/// Round to a whole percentage in `[0, 100]`. NaN maps to `nan_as`.
fn percent(fraction: f64, nan_as: u8) -> u8 {
    if fraction.is_nan() {
        return nan_as;
    }
    (fraction * 100.0).round().clamp(0.0, 100.0) as u8
}
