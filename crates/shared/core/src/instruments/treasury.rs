use serde::{Deserialize, Serialize};

/// Government bonds, always bought and sold at par
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Treasury {
    /// Annual rate, shown to players only
    pub interest_rate: f64,
    pub price: f64,
}

impl Default for Treasury {
    fn default() -> Self {
        Self {
            interest_rate: 3.5,
            price: 100.0,
        }
    }
}

/// Permanent holding paying a fixed income every fourth week
///
/// Units can never be sold and are ignored by margin checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuantumSingularity {
    pub monthly_return_rate: f64,
    pub price: f64,
}

impl Default for QuantumSingularity {
    fn default() -> Self {
        Self {
            monthly_return_rate: 2.0,
            price: 1000.0,
        }
    }
}

impl QuantumSingularity {
    /// Income paid on `units` at each monthly payout
    pub fn monthly_return(&self, units: u64) -> f64 {
        units as f64 * self.price * self.monthly_return_rate / 100.0
    }
}
