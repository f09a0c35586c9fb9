//! Risk tiers and probability presentation

use std::fmt;

use serde::Serialize;

/// Probabilities below this are LOW risk
pub const LOW_RISK_CEILING: f64 = 0.30;

/// Probabilities below this (and at or above the LOW ceiling) are MEDIUM risk
pub const MEDIUM_RISK_CEILING: f64 = 0.60;

/// Display bounds so a probability never reads as 0% or 100%
pub const DISPLAY_FLOOR: f64 = 0.01;
pub const DISPLAY_CEILING: f64 = 0.99;

/// Risk bucket derived from a default probability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum RiskTier {
    Low,
    Medium,
    High,
}

impl RiskTier {
    pub fn from_probability(probability: f64) -> Self {
        if probability < LOW_RISK_CEILING {
            RiskTier::Low
        } else if probability < MEDIUM_RISK_CEILING {
            RiskTier::Medium
        } else {
            RiskTier::High
        }
    }

    /// Banner line shown above the probability
    pub fn headline(self) -> &'static str {
        match self {
            RiskTier::Low => "Low Credit Risk",
            RiskTier::Medium => "Medium Credit Risk",
            RiskTier::High => "High Credit Risk",
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskTier::Low => write!(f, "LOW RISK"),
            RiskTier::Medium => write!(f, "MEDIUM RISK"),
            RiskTier::High => write!(f, "HIGH RISK"),
        }
    }
}

/// Clip a probability into the display range
pub fn display_probability(probability: f64) -> f64 {
    probability.clamp(DISPLAY_FLOOR, DISPLAY_CEILING)
}
