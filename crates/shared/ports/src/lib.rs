//! Bourse Ports
//!
//! Port definitions (traits) for the Bourse market simulation.
//! These define the seams between the pricing/news domain and the
//! concrete models plugged into it.

mod impact;
mod reporting;

pub use impact::{ImpactModel, MarketSnapshot, TradeCost};
pub use reporting::{Coverage, ReportingPolicy, Story};
