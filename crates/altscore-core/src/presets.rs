//! Canned demonstration profiles.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::types::CreditInputs;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Active mobile-money user with regular usage.
    Good,
    /// Exactly the impact reference averages.
    Average,
    /// Sparse activity across every signal.
    Risky,
}

impl Preset {
    pub const ALL: [Preset; 3] = [Preset::Good, Preset::Average, Preset::Risky];

    pub fn inputs(&self) -> CreditInputs {
        match self {
            Self::Good => CreditInputs::new(35.0, 25.0, 4.0, 3500.0, 28.0),
            Self::Average => CreditInputs::new(25.0, 50.0, 5.0, 2500.0, 25.0),
            Self::Risky => CreditInputs::new(15.0, 10.0, 1.0, 800.0, 15.0),
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Good => "Good profile: frequent transactions and near-daily usage",
            Self::Average => "Average profile: every signal at its reference average",
            Self::Risky => "Risky profile: low activity across all signals",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => f.write_str("good"),
            Self::Average => f.write_str("average"),
            Self::Risky => f.write_str("risky"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.to_string().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown preset: {s} (use good|average|risky)"))
    }
}
