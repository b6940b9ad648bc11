//! Scoring constants. These seed [`ScoringConfig::default`](crate::config::ScoringConfig)
//! and are never read by the engine directly.

/// Lowest score a result can carry.
pub const SCORE_MIN: u16 = 300;
/// Highest score a result can carry.
pub const SCORE_MAX: u16 = 850;

/// Score points per progress-bar percent: `(SCORE_MAX - SCORE_MIN) / 100`.
pub const PROGRESS_POINTS_PER_PERCENT: f64 = 5.5;

/// Tolerance applied when checking that feature weights sum to 1.0.
pub const WEIGHT_SUM_TOLERANCE: f64 = 1e-9;

/// Active usage days the input layer advertises as the monthly maximum.
///
/// Values above it are accepted and saturate during normalization.
pub const MAX_USAGE_DAYS: f64 = 31.0;

// --- Feature weights (sum to 1.0) ---

pub const WEIGHT_TRANSACTIONS: f64 = 0.35;
pub const WEIGHT_TOPUP: f64 = 0.25;
pub const WEIGHT_BILLS: f64 = 0.20;
pub const WEIGHT_DATA: f64 = 0.10;
pub const WEIGHT_USAGE: f64 = 0.10;

// --- Normalization caps (raw value at which a feature saturates to 1.0) ---

pub const CAP_TRANSACTIONS: f64 = 50.0;
pub const CAP_TOPUP: f64 = 100.0;
pub const CAP_BILLS: f64 = 10.0;
pub const CAP_DATA_MB: f64 = 5000.0;
pub const CAP_USAGE_DAYS: f64 = 30.0;

// --- Reference averages used for impact labels ---

pub const AVG_TRANSACTIONS: f64 = 25.0;
pub const AVG_TOPUP: f64 = 50.0;
pub const AVG_BILLS: f64 = 5.0;
pub const AVG_DATA_MB: f64 = 2500.0;
pub const AVG_USAGE_DAYS: f64 = 25.0;

// --- Impact ratio thresholds (value / average, strictly greater than) ---

pub const IMPACT_STRONG_POSITIVE_RATIO: f64 = 1.2;
pub const IMPACT_POSITIVE_RATIO: f64 = 0.8;
pub const IMPACT_NEUTRAL_RATIO: f64 = 0.5;

// --- Score scales ---

/// Simple variant: `score = base * 850 + 300`.
pub const SIMPLE_SCALE: f64 = 850.0;
/// Ensemble variant: `score = final * 550 + 300`.
pub const ENSEMBLE_SCALE: f64 = 550.0;

// --- Ensemble derived features ---

pub const INTERACTION_FACTOR: f64 = 0.1;
pub const CONSISTENCY_FACTOR: f64 = 0.05;
pub const DAYS_PER_MONTH: f64 = 30.0;
pub const MB_PER_GB: f64 = 1000.0;
pub const MONTHS_PER_YEAR: f64 = 12.0;
pub const COMPLETENESS_WEIGHT: f64 = 0.7;
pub const CONSISTENCY_WEIGHT: f64 = 0.3;

/// Half-width of the uniform perturbation added to the ensemble score.
pub const VARIANCE_BOUND: f64 = 0.01;
