//! altscore: score mobile-usage profiles from the command line.
//!
//! Collects the five behavioural signals (or a canned preset), runs the
//! scoring engine and renders the result as text or JSON. Logs go to
//! stderr so stdout carries only the rendered result.

mod render;
mod settings;

use std::path::PathBuf;

use altscore_core::presets::Preset;
use altscore_core::traits::{CreditScorer, VarianceSource};
use altscore_core::types::{coerce_field, CreditInputs, ScoreResult, ScoringVariant};
use altscore_engine::{RngVariance, ScoringEngine};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::{debug, info};

/// Alternative-data credit scoring.
#[derive(Parser)]
#[command(name = "altscore")]
#[command(version, about = "Credit scores from mobile usage signals")]
struct Cli {
    /// Scoring config file (TOML or JSON). Defaults to altscore/altscore.toml
    /// under the platform config directory, if present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    /// Log output format ("text" or "json")
    #[arg(long, global = true, default_value = "text")]
    log_format: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one profile.
    Score(ScoreArgs),
    /// List the canned profiles with their scores.
    Presets(PresetsArgs),
    /// Print the effective scoring configuration as JSON.
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Args)]
struct ScoreArgs {
    /// Score a canned profile instead of the field flags.
    #[arg(long, conflicts_with_all = ["transactions", "topup", "bills", "data", "usage"])]
    preset: Option<Preset>,

    /// Mobile money transactions per month.
    #[arg(long, default_value = "0", value_parser = parse_field, allow_hyphen_values = true)]
    transactions: f64,

    /// Average airtime top-up amount.
    #[arg(long, default_value = "0", value_parser = parse_field, allow_hyphen_values = true)]
    topup: f64,

    /// Bills paid digitally per month.
    #[arg(long, default_value = "0", value_parser = parse_field, allow_hyphen_values = true)]
    bills: f64,

    /// Monthly data usage in MB.
    #[arg(long, default_value = "0", value_parser = parse_field, allow_hyphen_values = true)]
    data: f64,

    /// Days per month the phone is active.
    #[arg(long, default_value = "0", value_parser = parse_field, allow_hyphen_values = true)]
    usage: f64,

    /// Scoring model (simple or ensemble).
    #[arg(long, default_value = "simple")]
    variant: ScoringVariant,

    /// Seed the ensemble variance for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl ScoreArgs {
    fn inputs(&self) -> CreditInputs {
        match self.preset {
            Some(preset) => preset.inputs(),
            None => CreditInputs::new(
                self.transactions,
                self.topup,
                self.bills,
                self.data,
                self.usage,
            ),
        }
    }
}

#[derive(Args)]
struct PresetsArgs {
    /// Scoring model used for the listed scores.
    #[arg(long, default_value = "simple")]
    variant: ScoringVariant,

    /// Seed the ensemble variance for reproducible output.
    #[arg(long)]
    seed: Option<u64>,

    /// Output format.
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

/// Blank or non-numeric form text scores as zero.
fn parse_field(raw: &str) -> Result<f64, String> {
    Ok(coerce_field(raw))
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(&cli.log_level, &cli.log_format);

    let scoring = settings::load(cli.config.as_deref())?;
    let engine = ScoringEngine::new(scoring).context("failed to build scoring engine")?;
    info!(version = env!("CARGO_PKG_VERSION"), "altscore starting");

    match cli.command {
        Commands::Score(args) => score(&engine, args),
        Commands::Presets(args) => presets(&engine, args),
        Commands::Config => {
            let json = serde_json::to_string_pretty(engine.config())
                .context("failed to serialize config")?;
            println!("{json}");
            Ok(())
        }
    }
}

fn score(engine: &ScoringEngine, args: ScoreArgs) -> Result<()> {
    let inputs = args.inputs();
    debug!(?inputs, variant = %args.variant, "cli: scoring");

    let result = compute(engine, &inputs, args.variant, args.seed)?;
    match args.format {
        OutputFormat::Text => print!("{}", render::text(&result, engine.config())),
        OutputFormat::Json => println!("{}", render::json(&inputs, &result, engine.config())?),
    }
    Ok(())
}

fn presets(engine: &ScoringEngine, args: PresetsArgs) -> Result<()> {
    let mut variance = variance_source(args.seed);
    let batch: Vec<CreditInputs> = Preset::ALL.iter().map(Preset::inputs).collect();
    let results = engine
        .compute_batch(&batch, args.variant, variance.as_mut())
        .context("failed to score presets")?;
    let rows: Vec<(Preset, ScoreResult)> = Preset::ALL.into_iter().zip(results).collect();

    match args.format {
        OutputFormat::Text => print!("{}", render::presets_text(&rows)),
        OutputFormat::Json => println!("{}", render::presets_json(&rows)?),
    }
    Ok(())
}

fn compute(
    engine: &ScoringEngine,
    inputs: &CreditInputs,
    variant: ScoringVariant,
    seed: Option<u64>,
) -> Result<ScoreResult> {
    let result = match seed {
        Some(_) => engine.compute_with(inputs, variant, variance_source(seed).as_mut()),
        None => engine.compute(inputs, variant),
    };
    result.context("failed to score profile")
}

fn variance_source(seed: Option<u64>) -> Box<dyn VarianceSource> {
    match seed {
        Some(seed) => Box::new(RngVariance::seeded(seed)),
        None => Box::new(RngVariance::thread_local()),
    }
}

fn init_logging(level_str: &str, format: &str) {
    use tracing_subscriber::filter::EnvFilter;
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level_str));

    if format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(true)
                    .with_level(true)
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}
