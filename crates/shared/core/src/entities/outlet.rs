use serde::{Deserialize, Serialize};
use std::fmt;

/// News outlets covering breaking company events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outlet {
    /// Only confirmed stories, always accurate
    FinancialTimes,
    /// Clickbait, runs a headline for everything
    MarketPulseDaily,
    /// Insider desk, leaks private events early
    WallStreetWire,
    /// Negative-leaning gossip
    RumorMill,
}

impl Outlet {
    /// All outlets in reporting order
    pub const ALL: [Outlet; 4] = [
        Outlet::FinancialTimes,
        Outlet::MarketPulseDaily,
        Outlet::WallStreetWire,
        Outlet::RumorMill,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            Outlet::FinancialTimes => "Financial Times",
            Outlet::MarketPulseDaily => "Market Pulse Daily",
            Outlet::WallStreetWire => "Wall Street Wire",
            Outlet::RumorMill => "The Rumor Mill",
        }
    }
}

impl fmt::Display for Outlet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}
