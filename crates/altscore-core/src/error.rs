//! Error types for the Altscore engine.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScoringError {
    #[error("invalid input: {field} = {value} (must be finite and non-negative)")] InvalidInput { field: &'static str, value: f64 },
    #[error("no {table} band covers score {score}")] NoBand { table: &'static str, score: u16 },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("invalid weight for {feature}: {value}")] InvalidWeight { feature: &'static str, value: f64 },
    #[error("weights must sum to 1.0, got {0}")] WeightSum(f64),
    #[error("cap for {feature} must be positive, got {value}")] InvalidCap { feature: &'static str, value: f64 },
    #[error("reference average for {feature} must be positive, got {value}")] InvalidReference { feature: &'static str, value: f64 },
    #[error("impact thresholds must be finite and descending")] ImpactThresholds,
    #[error("{table} band table is empty")] EmptyBands { table: &'static str },
    #[error("{table} bands not strictly descending at index {index}")] UnorderedBands { table: &'static str, index: usize },
    #[error("{table} last band starts at {min_score}, above the score floor {floor}")] NoCatchAllBand { table: &'static str, min_score: u16, floor: u16 },
    #[error("invalid loan band at index {index}: {reason}")] InvalidLoanBand { index: usize, reason: String },
    #[error("score bounds inverted: {min} > {max}")] ScoreBounds { min: u16, max: u16 },
    #[error("{name} must be positive and finite, got {value}")] NonPositive { name: &'static str, value: f64 },
    #[error("{name} must be non-negative and finite, got {value}")] Negative { name: &'static str, value: f64 },
    #[error("variance bound must be non-negative and finite, got {0}")] VarianceBound(f64),
}

#[derive(Error, Debug)]
pub enum AltscoreError {
    #[error(transparent)] Scoring(#[from] ScoringError),
    #[error(transparent)] Config(#[from] ConfigError),
}
