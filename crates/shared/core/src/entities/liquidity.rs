use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse liquidity classification of a stock
///
/// Drives the assumed daily traded volume and therefore how far a trade
/// of a given size moves the price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LiquidityTier {
    High,
    Medium,
    Low,
}

impl LiquidityTier {
    /// Share of market cap assumed to trade each day
    pub fn daily_volume_pct(&self) -> f64 {
        match self {
            LiquidityTier::High => 0.02,
            LiquidityTier::Medium => 0.005,
            LiquidityTier::Low => 0.001,
        }
    }

    /// Multiplier applied to the MEDIUM baseline impact coefficients
    pub fn coefficient_multiplier(&self) -> f64 {
        match self {
            LiquidityTier::High => 0.7,
            LiquidityTier::Medium => 1.0,
            LiquidityTier::Low => 1.5,
        }
    }
}

impl fmt::Display for LiquidityTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LiquidityTier::High => "high",
            LiquidityTier::Medium => "medium",
            LiquidityTier::Low => "low",
        };
        write!(f, "{label}")
    }
}
