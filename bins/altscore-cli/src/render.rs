//! Text and JSON rendering of score results.

use altscore_core::config::ScoringConfig;
use altscore_core::presets::Preset;
use altscore_core::types::{CreditInputs, Feature, RiskTier, ScoreResult, ScoringVariant};
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

const BAR_WIDTH: usize = 30;

/// JSON document written by `altscore score --format json`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Report<'a> {
    pub generated_at: DateTime<Utc>,
    pub inputs: &'a CreditInputs,
    pub progress_percent: f64,
    #[serde(flatten)]
    pub result: &'a ScoreResult,
}

impl<'a> Report<'a> {
    pub fn new(inputs: &'a CreditInputs, result: &'a ScoreResult, config: &ScoringConfig) -> Self {
        Self {
            generated_at: Utc::now(),
            inputs,
            progress_percent: result.progress_percent_within(config.score_min, config.score_max),
            result,
        }
    }
}

pub fn json(inputs: &CreditInputs, result: &ScoreResult, config: &ScoringConfig) -> Result<String> {
    serde_json::to_string_pretty(&Report::new(inputs, result, config))
        .context("failed to serialize score report")
}

fn progress_bar(percent: f64) -> String {
    let filled = ((percent / 100.0) * BAR_WIDTH as f64)
        .round()
        .clamp(0.0, BAR_WIDTH as f64) as usize;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(BAR_WIDTH - filled))
}

/// Human-readable result. The bar spans the configured score range.
pub fn text(result: &ScoreResult, config: &ScoringConfig) -> String {
    let mut out = String::new();
    let progress = result.progress_percent_within(config.score_min, config.score_max);

    out.push_str(&format!(
        "Credit score: {} ({} risk, {} model)\n",
        result.score, result.risk, result.variant
    ));
    out.push_str(&format!("{} {:.1}%\n", progress_bar(progress), progress));
    out.push_str(&format!("{}\n", result.recommendation));

    if let (Some(amount), Some(rate)) = (result.loan_amount, result.interest_rate) {
        out.push_str(&format!("Loan offer: up to {amount:.2} at {rate:.1}%\n"));
    }
    if let Some(confidence) = result.confidence {
        out.push_str(&format!("Confidence: {confidence}%\n"));
    }
    if let Some(probability) = result.probability {
        out.push_str(&format!("Default probability: {probability}%\n"));
    }

    out.push_str("\nFeature importance:\n");
    for row in &result.feature_importance {
        out.push_str(&format!(
            "  {:<26} {:>5.1}%  value {:>8}  {}\n",
            row.name, row.importance, row.value, row.impact
        ));
    }
    out
}

/// One line per preset with its raw fields and score.
pub fn presets_text(rows: &[(Preset, ScoreResult)]) -> String {
    let mut out = String::new();
    for (preset, result) in rows {
        let inputs = preset.inputs();
        let fields: Vec<String> = Feature::ALL
            .iter()
            .map(|f| format!("{}={}", f.input_field(), inputs.value(*f)))
            .collect();
        out.push_str(&format!(
            "{:<8} {:>3} {:<6} {}\n         {}\n",
            preset.to_string(),
            result.score,
            result.risk.to_string(),
            preset.description(),
            fields.join(" ")
        ));
    }
    out
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PresetRow<'a> {
    preset: Preset,
    description: &'static str,
    inputs: CreditInputs,
    score: u16,
    variant: ScoringVariant,
    risk: RiskTier,
    recommendation: &'a str,
}

pub fn presets_json(rows: &[(Preset, ScoreResult)]) -> Result<String> {
    let rows: Vec<PresetRow<'_>> = rows
        .iter()
        .map(|(preset, result)| PresetRow {
            preset: *preset,
            description: preset.description(),
            inputs: preset.inputs(),
            score: result.score,
            variant: result.variant,
            risk: result.risk,
            recommendation: &result.recommendation,
        })
        .collect();
    serde_json::to_string_pretty(&rows).context("failed to serialize presets")
}
