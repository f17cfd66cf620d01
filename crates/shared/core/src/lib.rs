//! Bourse Core Domain
//!
//! Pure domain types for the Bourse market simulation.
//! This crate contains no I/O and is 100% unit testable. Every stochastic
//! rule takes its random source as an argument.

pub mod entities;
pub mod instruments;
pub mod values;

// Re-export commonly used types at crate root
pub use entities::{CycleKind, LiquidityTier, Outlet, Sentiment, Side};
pub use instruments::{
    CatalystUnavailable, Company, ElfQueenWater, Gold, GoldCoin, HolyWater, QuantumSingularity,
    ROSTER, RosterEntry, ThemedAssets, Treasury, VoidCatalyst, VoidStocks, default_roster,
    roster_market_cap,
};
pub use values::{PRICE_FLOOR, Price, Week, apply_percent, floor_price};
