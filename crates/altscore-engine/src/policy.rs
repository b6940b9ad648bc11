//! Score rescaling, tier selection and loan terms.

use altscore_core::config::{Band, LoanBand};
use altscore_core::types::RiskTier;

/// Map a pre-rescale aggregate onto the score range.
///
/// `round(clamp(value × scale + min, min, max))`. Both variants clamp, so
/// large ensemble bonuses and the simple variant's ×850 scale stay in range.
/// Infinities clamp to the nearest bound; NaN maps to `min`.
pub fn rescale(value: f64, scale: f64, min: u16, max: u16) -> u16 {
    let raw = value * scale + f64::from(min);
    if raw.is_nan() {
        return min;
    }
    raw
        .clamp(f64::from(min), f64::from(max))
        .round() as u16
}

/// First band (top to bottom) whose `min_score` is at or below `score`.
///
/// Scores below every band fall back to the last one. `None` only for an
/// empty table.
pub fn select_band<B: Band>(bands: &[B], score: u16) -> Option<&B> {
    bands
        .iter()
        .find(|band| score >= band.min_score())
        .or_else(|| bands.last())
}

/// Loan offer produced by an ensemble band.
#[derive(Debug, Clone, PartialEq)]
pub struct LoanOffer {
    pub risk: RiskTier,
    pub amount: f64,
    /// Annual rate, percent.
    pub interest_rate: f64,
    pub recommendation: String,
}

/// Derive loan terms from a band and the annualized top-up spend.
pub fn loan_offer(band: &LoanBand, total_spending: f64) -> LoanOffer {
    let amount = (total_spending * band.spend_multiple).max(band.min_amount);
    let recommendation = format!(
        "{}. Approved for {} of up to {:.2} at {:.1}% interest.",
        band.headline, band.product, amount, band.interest_rate
    );
    LoanOffer {
        risk: band.risk,
        amount,
        interest_rate: band.interest_rate,
        recommendation,
    }
}
