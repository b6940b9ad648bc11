//! Scoring configuration.
//!
//! [`ScoringConfig`] gathers every constant the engine uses: feature weights,
//! normalization caps, impact reference averages, tier thresholds, loan
//! bands and the ensemble's derived-feature factors. The default reproduces
//! the production policy table; [`ScoringConfig::global`] exposes it as an
//! immutable process-wide instance.
//!
//! Band tables are evaluated top to bottom and the first band whose
//! `min_score` is at or below the score wins.

use std::sync::LazyLock;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::types::{Feature, PerFeature, RiskTier};

/// Share of the aggregate each feature contributes. Sums to 1.0.
pub type FeatureWeights = PerFeature<f64>;
/// Raw value at which each feature saturates to 1.0 when normalized.
pub type FeatureCaps = PerFeature<f64>;
/// Typical raw value per feature, used to label impact.
pub type ReferenceAverages = PerFeature<f64>;

static GLOBAL: LazyLock<ScoringConfig> = LazyLock::new(ScoringConfig::default);

/// Ratio thresholds (`value / average`) for impact labels. Each comparison
/// is strictly greater-than.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ImpactThresholds {
    pub strong_positive: f64,
    pub positive: f64,
    pub neutral: f64,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            strong_positive: IMPACT_STRONG_POSITIVE_RATIO,
            positive: IMPACT_POSITIVE_RATIO,
            neutral: IMPACT_NEUTRAL_RATIO,
        }
    }
}

/// Common view over the rows of a tier table.
pub trait Band {
    fn min_score(&self) -> u16;
    fn risk(&self) -> RiskTier;
}

/// Tier row for the simple variant: no loan terms, fixed text.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct SimpleBand {
    pub min_score: u16,
    pub risk: RiskTier,
    pub recommendation: String,
}

impl Band for SimpleBand {
    fn min_score(&self) -> u16 {
        self.min_score
    }
    fn risk(&self) -> RiskTier {
        self.risk
    }
}

/// Tier row for the ensemble variant.
///
/// Loan amount is `max(min_amount, annual_spend * spend_multiple)`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LoanBand {
    pub min_score: u16,
    pub risk: RiskTier,
    pub spend_multiple: f64,
    pub min_amount: f64,
    /// Annual rate, percent.
    pub interest_rate: f64,
    /// Opening sentence of the recommendation, e.g. "Excellent creditworthiness".
    pub headline: String,
    /// Product phrase, e.g. "a premium loan".
    pub product: String,
}

impl Band for LoanBand {
    fn min_score(&self) -> u16 {
        self.min_score
    }
    fn risk(&self) -> RiskTier {
        self.risk
    }
}

/// Factors for the ensemble's derived features and estimates.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct EnsembleSettings {
    /// Multiplier from final score to points above the floor.
    pub scale: f64,
    /// Half-width of the uniform random perturbation.
    pub variance_bound: f64,
    pub interaction_factor: f64,
    pub consistency_factor: f64,
    pub days_per_month: f64,
    pub mb_per_gb: f64,
    pub months_per_year: f64,
    pub completeness_weight: f64,
    pub consistency_weight: f64,
}

impl Default for EnsembleSettings {
    fn default() -> Self {
        Self {
            scale: ENSEMBLE_SCALE,
            variance_bound: VARIANCE_BOUND,
            interaction_factor: INTERACTION_FACTOR,
            consistency_factor: CONSISTENCY_FACTOR,
            days_per_month: DAYS_PER_MONTH,
            mb_per_gb: MB_PER_GB,
            months_per_year: MONTHS_PER_YEAR,
            completeness_weight: COMPLETENESS_WEIGHT,
            consistency_weight: CONSISTENCY_WEIGHT,
        }
    }
}

/// Complete scoring policy. See the module docs.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ScoringConfig {
    pub score_min: u16,
    pub score_max: u16,
    pub weights: FeatureWeights,
    pub caps: FeatureCaps,
    pub reference: ReferenceAverages,
    pub impact: ImpactThresholds,
    /// Multiplier from base score to points above the floor (simple variant).
    pub simple_scale: f64,
    pub simple_bands: Vec<SimpleBand>,
    pub ensemble: EnsembleSettings,
    pub loan_bands: Vec<LoanBand>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            score_min: SCORE_MIN,
            score_max: SCORE_MAX,
            weights: PerFeature {
                transactions: WEIGHT_TRANSACTIONS,
                topup: WEIGHT_TOPUP,
                bills: WEIGHT_BILLS,
                data: WEIGHT_DATA,
                usage: WEIGHT_USAGE,
            },
            caps: PerFeature {
                transactions: CAP_TRANSACTIONS,
                topup: CAP_TOPUP,
                bills: CAP_BILLS,
                data: CAP_DATA_MB,
                usage: CAP_USAGE_DAYS,
            },
            reference: PerFeature {
                transactions: AVG_TRANSACTIONS,
                topup: AVG_TOPUP,
                bills: AVG_BILLS,
                data: AVG_DATA_MB,
                usage: AVG_USAGE_DAYS,
            },
            impact: ImpactThresholds::default(),
            simple_scale: SIMPLE_SCALE,
            simple_bands: default_simple_bands(),
            ensemble: EnsembleSettings::default(),
            loan_bands: default_loan_bands(),
        }
    }
}

fn default_simple_bands() -> Vec<SimpleBand> {
    vec![
        SimpleBand {
            min_score: 700,
            risk: RiskTier::Low,
            recommendation: "Excellent creditworthiness. Approved for premium loan products with low interest rates.".to_string(),
        },
        SimpleBand {
            min_score: 600,
            risk: RiskTier::Medium,
            recommendation: "Good creditworthiness. Approved for standard loan products with moderate terms.".to_string(),
        },
        SimpleBand {
            min_score: SCORE_MIN,
            risk: RiskTier::High,
            recommendation: "Limited creditworthiness. Consider micro-loans or secured credit products.".to_string(),
        },
    ]
}

fn default_loan_bands() -> Vec<LoanBand> {
    vec![
        LoanBand {
            min_score: 720,
            risk: RiskTier::Low,
            spend_multiple: 3.0,
            min_amount: 0.0,
            interest_rate: 8.5,
            headline: "Excellent creditworthiness".to_string(),
            product: "a premium loan".to_string(),
        },
        LoanBand {
            min_score: 650,
            risk: RiskTier::Medium,
            spend_multiple: 2.0,
            min_amount: 0.0,
            interest_rate: 12.5,
            headline: "Good creditworthiness".to_string(),
            product: "a standard loan".to_string(),
        },
        LoanBand {
            min_score: 550,
            risk: RiskTier::Medium,
            spend_multiple: 1.5,
            min_amount: 0.0,
            interest_rate: 18.5,
            headline: "Fair creditworthiness".to_string(),
            product: "a starter loan".to_string(),
        },
        LoanBand {
            min_score: SCORE_MIN,
            risk: RiskTier::High,
            spend_multiple: 0.8,
            min_amount: 100.0,
            interest_rate: 25.0,
            headline: "Limited creditworthiness".to_string(),
            product: "a micro-loan".to_string(),
        },
    ]
}

impl ScoringConfig {
    /// Shared default configuration. Initialized once, never mutated.
    pub fn global() -> &'static ScoringConfig {
        &GLOBAL
    }

    /// Check every table for internal consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.score_min > self.score_max {
            return Err(ConfigError::ScoreBounds {
                min: self.score_min,
                max: self.score_max,
            });
        }

        for (feature, weight) in self.weights.iter() {
            if !weight.is_finite() || *weight < 0.0 {
                return Err(ConfigError::InvalidWeight {
                    feature: feature.key(),
                    value: *weight,
                });
            }
        }
        let sum = self.weights.sum();
        if (sum - 1.0).abs() > WEIGHT_SUM_TOLERANCE {
            return Err(ConfigError::WeightSum(sum));
        }

        for (feature, cap) in self.caps.iter() {
            if !positive(*cap) {
                return Err(ConfigError::InvalidCap {
                    feature: feature.key(),
                    value: *cap,
                });
            }
        }
        for (feature, avg) in self.reference.iter() {
            if !positive(*avg) {
                return Err(ConfigError::InvalidReference {
                    feature: feature.key(),
                    value: *avg,
                });
            }
        }

        let impact = &self.impact;
        let ordered = impact.strong_positive > impact.positive && impact.positive > impact.neutral;
        if !ordered || !impact.neutral.is_finite() || !impact.strong_positive.is_finite() {
            return Err(ConfigError::ImpactThresholds);
        }

        check_positive("simple_scale", self.simple_scale)?;
        check_positive("ensemble.scale", self.ensemble.scale)?;
        check_positive("ensemble.days_per_month", self.ensemble.days_per_month)?;
        check_positive("ensemble.mb_per_gb", self.ensemble.mb_per_gb)?;
        check_positive("ensemble.months_per_year", self.ensemble.months_per_year)?;
        check_non_negative("ensemble.interaction_factor", self.ensemble.interaction_factor)?;
        check_non_negative("ensemble.consistency_factor", self.ensemble.consistency_factor)?;
        check_non_negative("ensemble.completeness_weight", self.ensemble.completeness_weight)?;
        check_non_negative("ensemble.consistency_weight", self.ensemble.consistency_weight)?;
        let bound = self.ensemble.variance_bound;
        if !bound.is_finite() || bound < 0.0 {
            return Err(ConfigError::VarianceBound(bound));
        }

        self.validate_bands("simple", &self.simple_bands)?;
        self.validate_bands("loan", &self.loan_bands)?;
        for (index, band) in self.loan_bands.iter().enumerate() {
            let reason = if !non_negative(band.spend_multiple) {
                Some(format!("spend_multiple {}", band.spend_multiple))
            } else if !non_negative(band.min_amount) {
                Some(format!("min_amount {}", band.min_amount))
            } else if !non_negative(band.interest_rate) {
                Some(format!("interest_rate {}", band.interest_rate))
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(ConfigError::InvalidLoanBand { index, reason });
            }
        }

        Ok(())
    }

    fn validate_bands<B: Band>(&self, table: &'static str, bands: &[B]) -> Result<(), ConfigError> {
        let Some(last) = bands.last() else {
            return Err(ConfigError::EmptyBands { table });
        };
        for (index, pair) in bands.windows(2).enumerate() {
            if pair[1].min_score() >= pair[0].min_score() {
                return Err(ConfigError::UnorderedBands {
                    table,
                    index: index + 1,
                });
            }
        }
        if last.min_score() > self.score_min {
            return Err(ConfigError::NoCatchAllBand {
                table,
                min_score: last.min_score(),
                floor: self.score_min,
            });
        }
        Ok(())
    }

    /// Weight of a feature.
    pub fn weight(&self, feature: Feature) -> f64 {
        *self.weights.get(feature)
    }
}

fn positive(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

fn non_negative(v: f64) -> bool {
    v.is_finite() && v >= 0.0
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if positive(value) {
        Ok(())
    } else {
        Err(ConfigError::NonPositive { name, value })
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<(), ConfigError> {
    if non_negative(value) {
        Ok(())
    } else {
        Err(ConfigError::Negative { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Defaults
    // -------------------------------------------------------------------------

    #[test]
    fn default_is_valid() {
        ScoringConfig::default().validate().unwrap();
    }

    #[test]
    fn global_matches_default() {
        assert_eq!(ScoringConfig::global(), &ScoringConfig::default());
    }

    #[test]
    fn default_weights_sum_to_one() {
        let sum = ScoringConfig::default().weights.sum();
        assert!((sum - 1.0).abs() < WEIGHT_SUM_TOLERANCE, "sum = {sum}");
    }

    #[test]
    fn default_weights_match_policy() {
        let cfg = ScoringConfig::default();
        assert_eq!(cfg.weight(Feature::Transactions), 0.35);
        assert_eq!(cfg.weight(Feature::Topup), 0.25);
        assert_eq!(cfg.weight(Feature::Bills), 0.20);
        assert_eq!(cfg.weight(Feature::Data), 0.10);
        assert_eq!(cfg.weight(Feature::Usage), 0.10);
    }

    #[test]
    fn default_simple_thresholds() {
        let cfg = ScoringConfig::default();
        let mins: Vec<_> = cfg.simple_bands.iter().map(|b| b.min_score).collect();
        assert_eq!(mins, [700, 600, 300]);
    }

    #[test]
    fn default_loan_table() {
        let cfg = ScoringConfig::default();
        let rows: Vec<_> = cfg
            .loan_bands
            .iter()
            .map(|b| (b.min_score, b.risk, b.spend_multiple, b.interest_rate))
            .collect();
        assert_eq!(
            rows,
            [
                (720, RiskTier::Low, 3.0, 8.5),
                (650, RiskTier::Medium, 2.0, 12.5),
                (550, RiskTier::Medium, 1.5, 18.5),
                (300, RiskTier::High, 0.8, 25.0),
            ]
        );
        assert_eq!(cfg.loan_bands[3].min_amount, 100.0);
    }

    // -------------------------------------------------------------------------
    // Validation failures
    // -------------------------------------------------------------------------

    #[test]
    fn rejects_weights_not_summing_to_one() {
        let mut cfg = ScoringConfig::default();
        cfg.weights.usage = 0.2;
        assert!(matches!(cfg.validate(), Err(ConfigError::WeightSum(_))));
    }

    #[test]
    fn rejects_negative_weight() {
        let mut cfg = ScoringConfig::default();
        cfg.weights.data = -0.1;
        cfg.weights.usage = 0.3;
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::InvalidWeight {
                feature: "data",
                value: -0.1
            })
        );
    }

    #[test]
    fn rejects_zero_cap() {
        let mut cfg = ScoringConfig::default();
        cfg.caps.bills = 0.0;
        assert!(matches!(cfg.validate(), Err(ConfigError::InvalidCap { feature: "bills", .. })));
    }

    #[test]
    fn rejects_zero_reference() {
        let mut cfg = ScoringConfig::default();
        cfg.reference.topup = 0.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidReference { feature: "topup", .. })
        ));
    }

    #[test]
    fn rejects_unordered_impact_thresholds() {
        let mut cfg = ScoringConfig::default();
        cfg.impact.positive = 1.5;
        assert_eq!(cfg.validate(), Err(ConfigError::ImpactThresholds));
    }

    #[test]
    fn rejects_empty_band_table() {
        let mut cfg = ScoringConfig::default();
        cfg.loan_bands.clear();
        assert_eq!(cfg.validate(), Err(ConfigError::EmptyBands { table: "loan" }));
    }

    #[test]
    fn rejects_unordered_bands() {
        let mut cfg = ScoringConfig::default();
        cfg.simple_bands.swap(0, 1);
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::UnorderedBands {
                table: "simple",
                index: 1
            })
        );
    }

    #[test]
    fn rejects_missing_catch_all() {
        let mut cfg = ScoringConfig::default();
        cfg.simple_bands.pop();
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::NoCatchAllBand {
                table: "simple",
                min_score: 600,
                floor: 300
            })
        );
    }

    #[test]
    fn rejects_negative_interest_rate() {
        let mut cfg = ScoringConfig::default();
        cfg.loan_bands[1].interest_rate = -1.0;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidLoanBand { index: 1, .. })
        ));
    }

    #[test]
    fn rejects_inverted_bounds() {
        let cfg = ScoringConfig {
            score_min: 900,
            ..ScoringConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ScoreBounds { min: 900, max: 850 }));
    }

    #[test]
    fn rejects_negative_variance_bound() {
        let mut cfg = ScoringConfig::default();
        cfg.ensemble.variance_bound = -0.5;
        assert_eq!(cfg.validate(), Err(ConfigError::VarianceBound(-0.5)));
    }

    #[test]
    fn rejects_zero_scale() {
        let cfg = ScoringConfig {
            simple_scale: 0.0,
            ..ScoringConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::NonPositive { name: "simple_scale", .. })
        ));
    }

    #[test]
    fn rejects_nan_interaction_factor() {
        let mut cfg = ScoringConfig::default();
        cfg.ensemble.interaction_factor = f64::NAN;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative { name: "ensemble.interaction_factor", .. })
        ));
    }

    #[test]
    fn rejects_negative_consistency_factor() {
        let mut cfg = ScoringConfig::default();
        cfg.ensemble.consistency_factor = -0.05;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative { name: "ensemble.consistency_factor", .. })
        ));
    }

    #[test]
    fn rejects_bad_confidence_weights() {
        let mut cfg = ScoringConfig::default();
        cfg.ensemble.completeness_weight = f64::INFINITY;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative { name: "ensemble.completeness_weight", .. })
        ));

        let mut cfg = ScoringConfig::default();
        cfg.ensemble.consistency_weight = -0.3;
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::Negative { name: "ensemble.consistency_weight", .. })
        ));
    }

    #[test]
    fn accepts_zero_bonus_factors() {
        let mut cfg = ScoringConfig::default();
        cfg.ensemble.interaction_factor = 0.0;
        cfg.ensemble.consistency_factor = 0.0;
        assert_eq!(cfg.validate(), Ok(()));
    }

    // -------------------------------------------------------------------------
    // Serde
    // -------------------------------------------------------------------------

    #[test]
    fn json_round_trip_preserves_policy() {
        let cfg = ScoringConfig::default();
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ScoringConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn weights_use_feature_keys() {
        let json = serde_json::to_value(ScoringConfig::default()).unwrap();
        assert_eq!(json["weights"]["transactions"], 0.35);
        assert_eq!(json["caps"]["data"], 5000.0);
        assert_eq!(json["loan_bands"][0]["risk"], "low");
    }
}
