use serde::{Deserialize, Serialize};
use std::fmt;

/// Macro-economic regime that overrides the random walk while active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleKind {
    BullMarket,
    BearMarket,
    Recession,
    Inflation,
    MarketCrash,
    Recovery,
    TechBoom,
}

impl CycleKind {
    pub const ALL: [CycleKind; 7] = [
        CycleKind::BullMarket,
        CycleKind::BearMarket,
        CycleKind::Recession,
        CycleKind::Inflation,
        CycleKind::MarketCrash,
        CycleKind::Recovery,
        CycleKind::TechBoom,
    ];

    /// Weekly percentage drift range `(low, high)` for a company in `industry`
    ///
    /// Both bounds carry the sign of the move, so a drop of 2..5% is `(-5.0, -2.0)`.
    pub fn drift_range(&self, industry: &str) -> (f64, f64) {
        match self {
            CycleKind::BullMarket => (3.0, 7.0),
            CycleKind::BearMarket => (-5.0, -2.0),
            CycleKind::Recession => (-8.0, -4.0),
            CycleKind::Inflation => match industry {
                "Energy" => (4.0, 8.0),
                "Mana Extraction" => (5.0, 10.0),
                _ => (-4.0, -2.0),
            },
            CycleKind::MarketCrash => match industry {
                "Golem Manufacturing" => (-20.0, -12.0),
                "Mana Extraction" => (-18.0, -10.0),
                _ => (-15.0, -8.0),
            },
            CycleKind::Recovery => match industry {
                "Golem Manufacturing" => (3.0, 6.0),
                _ => (5.0, 10.0),
            },
            CycleKind::TechBoom => match industry {
                "Technology" | "Electronics" => (7.0, 12.0),
                "Golem Manufacturing" => (10.0, 15.0),
                "Mana Extraction" => (6.0, 10.0),
                _ => (2.0, 4.0),
            },
        }
    }

    pub fn headline(&self) -> &'static str {
        match self {
            CycleKind::BullMarket => "BULL MARKET SURGE - Economic Expansion Accelerates!",
            CycleKind::BearMarket => "BEAR MARKET BEGINS - Economic Slowdown Hits Markets",
            CycleKind::Recession => {
                "RECESSION DECLARED - Economy Contracts for Second Consecutive Quarter"
            }
            CycleKind::Inflation => "INFLATION CRISIS - Consumer Prices Soar to Decade Highs",
            CycleKind::MarketCrash => "MARKET CRASH - Panic Selling Triggers Circuit Breakers",
            CycleKind::Recovery => "ECONOMIC RECOVERY - Markets Rally on Strong Rebound Signals",
            CycleKind::TechBoom => "TECHNOLOGY BOOM - Innovation Wave Transforms Markets",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CycleKind::BullMarket => {
                "Strong GDP growth and rising corporate profits drive markets higher across all sectors."
            }
            CycleKind::BearMarket => {
                "Weakening indicators and declining earnings push markets into sustained decline."
            }
            CycleKind::Recession => {
                "Unemployment rises while consumer spending falls. Markets tumble."
            }
            CycleKind::Inflation => {
                "Central banks signal aggressive rate hikes. Energy and mana rally while other sectors slide."
            }
            CycleKind::MarketCrash => {
                "Cascading sell-offs spread panic. All sectors plummet in the worst trading in years."
            }
            CycleKind::Recovery => {
                "Stimulus takes effect and consumer confidence returns. Markets surge broadly."
            }
            CycleKind::TechBoom => {
                "Tech breakthroughs spark an investor frenzy led by technology and golem makers."
            }
        }
    }

    /// Regimes where prices broadly rise
    pub fn is_bullish(&self) -> bool {
        matches!(
            self,
            CycleKind::BullMarket | CycleKind::Recovery | CycleKind::TechBoom
        )
    }

    /// Regimes where prices broadly fall
    pub fn is_bearish(&self) -> bool {
        matches!(
            self,
            CycleKind::BearMarket | CycleKind::MarketCrash | CycleKind::Recession
        )
    }
}

impl fmt::Display for CycleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CycleKind::BullMarket => "Bull Market",
            CycleKind::BearMarket => "Bear Market",
            CycleKind::Recession => "Recession",
            CycleKind::Inflation => "Inflation",
            CycleKind::MarketCrash => "Market Crash",
            CycleKind::Recovery => "Recovery",
            CycleKind::TechBoom => "Tech Boom",
        };
        f.write_str(label)
    }
}
