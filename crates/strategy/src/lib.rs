//! Bourse Strategy Framework
//!
//! Automated hedge funds that trade alongside the human players:
//! - `Strategy` trait turning a read-only market context into actions
//! - Three built-in styles: aggressive growth, value and contrarian
//! - `HedgeFund`, a player account driven by a strategy
//!
//! ## Architecture
//!
//! ```text
//! Market ──► StrategyContext ──► Strategy ──► Vec<FundAction>
//!                                                  │
//!                                                  ▼
//!                         Market executes through the same trade paths
//!                         as human players (rejections are skipped)
//! ```
//!
//! Strategies never touch an account directly. They track the cash their
//! own earlier actions would free up or spend so a single week's plan stays
//! consistent, and the market books each action in order.

mod aggressive;
mod contrarian;
mod fund;
mod signals;
mod strategy;
mod value;

pub use aggressive::AggressiveGrowth;
pub use contrarian::Contrarian;
pub use fund::{FundStyle, HedgeFund, RESEARCH_PROBABILITY, default_funds};
pub use strategy::{FundAction, Strategy, StrategyContext};
pub use value::ValueInvestor;
