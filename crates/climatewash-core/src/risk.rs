//! Risk band classification.
//!
//! A pure step function over the closed score range [0, 100]. The
//! band boundaries are fixed policy, not a tuning toy.

use crate::types::RiskBand;

impl RiskBand {
    /// Human label for display.
    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::Compliant => "Compliant",
            RiskBand::LowRisk => "Low Risk",
            RiskBand::MediumRisk => "Medium Risk",
            RiskBand::HighRisk => "High Risk",
        }
    }

    /// Standard description attached to every diagnosis in this band.
    pub fn description(&self) -> &'static str {
        match self {
            RiskBand::Compliant => {
                "No material greenwashing indicators. The claims as presented \
                 are consistent with the selected directives."
            }
            RiskBand::LowRisk => {
                "Minor issues detected. Some expressions should be tightened \
                 or substantiated, but no serious violations were found."
            }
            RiskBand::MediumRisk => {
                "Multiple or significant issues detected. The claims are \
                 likely to mislead consumers under the selected directives \
                 and should be revised before publication."
            }
            RiskBand::HighRisk => {
                "Serious violations detected. The claims conflict with the \
                 selected directives and carry substantial legal and \
                 reputational exposure."
            }
        }
    }
}

/// Map a final score to its risk band.
///
/// Boundaries are inclusive on both ends: 86-100 Compliant, 51-85 low,
/// 16-50 medium, 0-15 high.
pub fn classify(final_score: u32) -> RiskBand {
    match final_score {
        86..=100 => RiskBand::Compliant,
        51..=85 => RiskBand::LowRisk,
        16..=50 => RiskBand::MediumRisk,
        _ => RiskBand::HighRisk,
    }
}
