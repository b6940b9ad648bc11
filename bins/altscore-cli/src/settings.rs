//! Scoring configuration loading.
//!
//! Sources are layered lowest to highest: built-in defaults, an optional
//! TOML/JSON file, then `ALTSCORE__*` environment variables
//! (`ALTSCORE__WEIGHTS__TRANSACTIONS=0.3`).

use std::path::{Path, PathBuf};

use altscore_core::config::ScoringConfig;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use tracing::debug;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "ALTSCORE";

/// `altscore/altscore.toml` under the platform config directory.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("altscore").join("altscore.toml"))
}

/// Load the effective configuration from the process environment.
///
/// An explicit `path` must exist. Without one, the default path is used
/// when present.
pub fn load(path: Option<&Path>) -> Result<ScoringConfig> {
    load_with_env(path, environment())
}

fn environment() -> Environment {
    Environment::with_prefix(ENV_PREFIX)
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}

fn load_with_env(path: Option<&Path>, env: Environment) -> Result<ScoringConfig> {
    let defaults = Config::try_from(&ScoringConfig::default())
        .context("failed to seed default scoring config")?;

    let mut builder = Config::builder().add_source(defaults);
    match path {
        Some(path) => {
            debug!(path = %path.display(), "config: loading file");
            builder = builder.add_source(File::from(path).required(true));
        }
        None => {
            if let Some(path) = default_config_path() {
                debug!(path = %path.display(), "config: checking default file");
                builder = builder.add_source(File::from(path.as_path()).required(false));
            }
        }
    }

    let scoring: ScoringConfig = builder
        .add_source(env)
        .build()
        .context("failed to read scoring config")?
        .try_deserialize()
        .context("failed to parse scoring config")?;

    scoring.validate().context("invalid scoring config")?;
    Ok(scoring)
}
