use std::collections::BTreeMap;

use rand::Rng;

use super::Company;
use crate::entities::LiquidityTier;

/// Static description of a listed company
#[derive(Debug, Clone, Copy)]
pub struct RosterEntry {
    pub name: &'static str,
    pub industry: &'static str,
    pub price: f64,
    pub volatility: f64,
    pub liquidity: LiquidityTier,
    pub market_cap: f64,
}

/// Companies listed at the start of every game
pub const ROSTER: [RosterEntry; 7] = [
    RosterEntry {
        name: "TechCorp",
        industry: "Technology",
        price: 150.0,
        volatility: 8.0,
        liquidity: LiquidityTier::High,
        market_cap: 400e9,
    },
    RosterEntry {
        name: "ElectroMax",
        industry: "Electronics",
        price: 85.0,
        volatility: 6.5,
        liquidity: LiquidityTier::Medium,
        market_cap: 150e9,
    },
    RosterEntry {
        name: "PharmaCare",
        industry: "Pharmaceuticals",
        price: 220.0,
        volatility: 5.0,
        liquidity: LiquidityTier::Low,
        market_cap: 250e9,
    },
    RosterEntry {
        name: "AutoDrive",
        industry: "Automotive",
        price: 95.0,
        volatility: 7.0,
        liquidity: LiquidityTier::Medium,
        market_cap: 160e9,
    },
    RosterEntry {
        name: "EnergyPlus",
        industry: "Energy",
        price: 110.0,
        volatility: 9.0,
        liquidity: LiquidityTier::Low,
        market_cap: 200e9,
    },
    RosterEntry {
        name: "Blue Energy Industries",
        industry: "Mana Extraction",
        price: 125.0,
        volatility: 9.5,
        liquidity: LiquidityTier::Medium,
        market_cap: 120e9,
    },
    RosterEntry {
        name: "Rock Friends Inc.",
        industry: "Golem Manufacturing",
        price: 78.0,
        volatility: 11.0,
        liquidity: LiquidityTier::Low,
        market_cap: 35e9,
    },
];

/// Build the starting market, keyed by company name
pub fn default_roster(rng: &mut impl Rng) -> BTreeMap<String, Company> {
    ROSTER
        .iter()
        .map(|entry| {
            let company = Company::new(
                entry.name,
                entry.industry,
                entry.price,
                entry.volatility,
                entry.liquidity,
                entry.market_cap,
                rng,
            );
            (entry.name.to_string(), company)
        })
        .collect()
}

/// Starting market cap of a roster company
pub fn roster_market_cap(name: &str) -> Option<f64> {
    ROSTER
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| entry.market_cap)
}
