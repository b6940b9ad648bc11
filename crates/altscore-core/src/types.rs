//! Input and result records for credit scoring.
//!
//! A [`CreditInputs`] record carries five alternative-data signals. Scoring
//! it produces one immutable [`ScoreResult`] holding the score, risk tier,
//! recommendation, optional loan terms, and a per-feature explanation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{SCORE_MAX, SCORE_MIN};
use crate::error::ScoringError;

/// One of the five behavioral signals, in declaration order.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "lowercase")]
pub enum Feature {
    /// Mobile-money transactions per month.
    Transactions,
    /// Average monthly airtime top-up, in currency units.
    Topup,
    /// Digital bill payments per month.
    Bills,
    /// Mobile data consumed per month, in megabytes.
    Data,
    /// Active phone usage days per month.
    Usage,
}

impl Feature {
    /// All features in declaration order. Ties in importance keep this order.
    pub const ALL: [Feature; 5] = [
        Feature::Transactions,
        Feature::Topup,
        Feature::Bills,
        Feature::Data,
        Feature::Usage,
    ];

    /// Stable machine key, also used as the config table key.
    pub fn key(&self) -> &'static str {
        match self {
            Self::Transactions => "transactions",
            Self::Topup => "topup",
            Self::Bills => "bills",
            Self::Data => "data",
            Self::Usage => "usage",
        }
    }

    /// Human-readable label shown next to the importance bar.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Transactions => "Mobile Money Transactions",
            Self::Topup => "Airtime Top-ups",
            Self::Bills => "Digital Bill Payments",
            Self::Data => "Data Usage",
            Self::Usage => "Phone Usage Pattern",
        }
    }

    /// Name of the matching [`CreditInputs`] field, as it appears on the wire.
    pub fn input_field(&self) -> &'static str {
        match self {
            Self::Transactions => "monthlyTransactions",
            Self::Topup => "averageTopup",
            Self::Bills => "billsPaid",
            Self::Data => "dataUsage",
            Self::Usage => "phoneUsageDays",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// A value for each of the five features.
///
/// Used for weights, normalization caps, and reference averages so that
/// every per-feature table has the same shape and key names.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
pub struct PerFeature<T> {
    pub transactions: T,
    pub topup: T,
    pub bills: T,
    pub data: T,
    pub usage: T,
}

impl<T> PerFeature<T> {
    pub fn get(&self, feature: Feature) -> &T {
        match feature {
            Feature::Transactions => &self.transactions,
            Feature::Topup => &self.topup,
            Feature::Bills => &self.bills,
            Feature::Data => &self.data,
            Feature::Usage => &self.usage,
        }
    }

    /// Iterate `(feature, value)` pairs in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Feature, &T)> {
        Feature::ALL.into_iter().map(move |f| (f, self.get(f)))
    }

    pub fn map<U>(&self, mut f: impl FnMut(Feature, &T) -> U) -> PerFeature<U> {
        PerFeature {
            transactions: f(Feature::Transactions, &self.transactions),
            topup: f(Feature::Topup, &self.topup),
            bills: f(Feature::Bills, &self.bills),
            data: f(Feature::Data, &self.data),
            usage: f(Feature::Usage, &self.usage),
        }
    }
}

impl PerFeature<f64> {
    pub fn sum(&self) -> f64 {
        self.iter().map(|(_, v)| *v).sum()
    }
}

/// Raw alternative-data signals for one applicant.
///
/// All fields are non-negative reals. Construct with [`CreditInputs::new`] or
/// [`CreditInputs::from_fields`]; the engine checks [`validate`](Self::validate)
/// before scoring.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreditInputs {
    pub monthly_transactions: f64,
    pub average_topup: f64,
    pub bills_paid: f64,
    pub data_usage: f64,
    pub phone_usage_days: f64,
}

impl CreditInputs {
    pub fn new(
        monthly_transactions: f64,
        average_topup: f64,
        bills_paid: f64,
        data_usage: f64,
        phone_usage_days: f64,
    ) -> Self {
        Self {
            monthly_transactions,
            average_topup,
            bills_paid,
            data_usage,
            phone_usage_days,
        }
    }

    /// Build a record from raw form text, in feature declaration order.
    ///
    /// Blank or non-numeric entries become 0 (see [`coerce_field`]).
    pub fn from_fields(fields: [&str; 5]) -> Self {
        let [t, a, b, d, u] = fields.map(coerce_field);
        Self::new(t, a, b, d, u)
    }

    /// Raw value of a single feature.
    pub fn value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::Transactions => self.monthly_transactions,
            Feature::Topup => self.average_topup,
            Feature::Bills => self.bills_paid,
            Feature::Data => self.data_usage,
            Feature::Usage => self.phone_usage_days,
        }
    }

    /// Copy with one feature replaced.
    pub fn with(mut self, feature: Feature, value: f64) -> Self {
        match feature {
            Feature::Transactions => self.monthly_transactions = value,
            Feature::Topup => self.average_topup = value,
            Feature::Bills => self.bills_paid = value,
            Feature::Data => self.data_usage = value,
            Feature::Usage => self.phone_usage_days = value,
        }
        self
    }

    /// Number of fields strictly greater than zero.
    pub fn populated_fields(&self) -> usize {
        Feature::ALL
            .iter()
            .filter(|f| self.value(**f) > 0.0)
            .count()
    }

    /// Reject negative and non-finite fields.
    ///
    /// Returns the first offending field in declaration order.
    pub fn validate(&self) -> Result<(), ScoringError> {
        for feature in Feature::ALL {
            let value = self.value(feature);
            if !value.is_finite() || value < 0.0 {
                return Err(ScoringError::InvalidInput {
                    field: feature.input_field(),
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Coerce one raw form entry to a number.
///
/// Parses the longest numeric prefix (so `"12 txns"` is 12). Blank text,
/// text with no numeric prefix, and non-finite results all become 0.
/// Negative numbers pass through unchanged; the engine rejects them.
pub fn coerce_field(raw: &str) -> f64 {
    let s = raw.trim();
    (1..=s.len())
        .rev()
        .filter(|&end| s.is_char_boundary(end))
        .find_map(|end| s[..end].parse::<f64>().ok())
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Which computation the engine runs.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ScoringVariant {
    /// Deterministic weighted sum, tier-only recommendation.
    #[default]
    Simple,
    /// Weighted sum plus derived bonuses, random variance, loan terms,
    /// confidence and default probability.
    Ensemble,
}

impl fmt::Display for ScoringVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Simple => f.write_str("simple"),
            Self::Ensemble => f.write_str("ensemble"),
        }
    }
}

impl FromStr for ScoringVariant {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "ensemble" => Ok(Self::Ensemble),
            other => Err(format!("unknown scoring variant: {other}")),
        }
    }
}

/// Risk tier derived from the final score.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Low => f.write_str("low"),
            Self::Medium => f.write_str("medium"),
            Self::High => f.write_str("high"),
        }
    }
}

/// Qualitative comparison of a raw value against its reference average.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ImpactLabel {
    #[serde(rename = "Strong Positive")]
    StrongPositive,
    #[serde(rename = "Positive")]
    Positive,
    #[serde(rename = "Neutral")]
    Neutral,
    #[serde(rename = "Needs Improvement")]
    NeedsImprovement,
}

impl fmt::Display for ImpactLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StrongPositive => f.write_str("Strong Positive"),
            Self::Positive => f.write_str("Positive"),
            Self::Neutral => f.write_str("Neutral"),
            Self::NeedsImprovement => f.write_str("Needs Improvement"),
        }
    }
}

/// One row of the explanation: how much a feature weighs and how the
/// applicant's value compares to the reference.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureImportance {
    pub feature: Feature,
    /// Display label, e.g. "Airtime Top-ups".
    pub name: String,
    /// Weight expressed as a percentage (`weight * 100`).
    pub importance: f64,
    /// Raw input value for this feature.
    pub value: f64,
    pub impact: ImpactLabel,
}

/// Complete outcome of one scoring call.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScoreResult {
    pub variant: ScoringVariant,
    /// Score in `[300, 850]`.
    pub score: u16,
    pub risk: RiskTier,
    pub recommendation: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub loan_amount: Option<f64>,
    /// Annual interest rate in percent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub interest_rate: Option<f64>,
    /// Input completeness and usage consistency, in percent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub confidence: Option<u8>,
    /// Nominal default probability, in percent.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub probability: Option<u8>,
    /// Sorted descending by importance.
    pub feature_importance: Vec<FeatureImportance>,
}

impl ScoreResult {
    /// Position of the score on a 0-100 bar spanning the default 300..=850.
    pub fn progress_percent(&self) -> f64 {
        self.progress_percent_within(SCORE_MIN, SCORE_MAX)
    }

    /// Position of the score on a 0-100 bar spanning `min..=max`.
    ///
    /// Scores outside the range pin to the ends. A degenerate range reads
    /// as full once the score reaches it.
    pub fn progress_percent_within(&self, min: u16, max: u16) -> f64 {
        if max <= min {
            return if self.score >= max { 100.0 } else { 0.0 };
        }
        let offset = self.score.clamp(min, max) - min;
        f64::from(offset) * 100.0 / f64::from(max - min)
    }
}
