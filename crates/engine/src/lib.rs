//! Bourse Engine
//!
//! Ties the bounded contexts into a playable game: the persisted
//! [`GameState`], the four-week lookahead that precomputes every company's
//! coming prices, market cycles, research hints and save files.
//!
//! A week runs in two calls on [`Market`]:
//!
//! 1. [`Market::open_week`] books weekly charges, lets breaking news run
//!    (instant stages move live prices now) and prints the gazettes.
//! 2. [`Market::advance_week`] lets funds trade, pops the front of the
//!    lookahead into the live prices, ticks cycles and pending impacts and
//!    extends the lookahead by one week.
//!
//! Delayed news stages are baked into the lookahead when it is computed, so
//! they reach the live price exactly once, through the buffer.

// Application layer
pub mod application;

// Infrastructure layer
pub mod infrastructure;

// Domain
pub mod config;
pub mod cycle;
pub mod error;
pub mod forecast;
pub mod research;
pub mod state;

pub use application::{
    AccountCharges, FundActivity, Market, QUANTUM_PAYOUT_INTERVAL, Standing, WeekOpening, WeekReport,
};
pub use config::EngineConfig;
pub use cycle::{ActiveMarketCycle, CYCLE_INTERVAL_WEEKS, MarketCycle, cycle_ended_message};
pub use error::{EngineError, Result};
pub use forecast::{FuturePriceBuffer, LOOKAHEAD_WEEKS};
pub use infrastructure::SaveGame;
pub use research::{HINT_ACCURACY, research_hint};
pub use state::GameState;
