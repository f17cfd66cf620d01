//! Bourse Runner - headless sessions
//!
//! Drives a Bourse game without a front end:
//!
//! - **Bootstrap**: new game or resumed save, plus one seat per human player
//! - **Agent**: autopilot that plays a seat with a fund strategy
//! - **Event Feed**: display lines for what happened each week
//! - **Simulation**: the week loop
//!
//! ```text
//!   open_week ──► autopilot turns ──► advance_week ──► event feed
//!       ▲                                                  │
//!       └──────────────────── next week ◄──────────────────┘
//! ```

pub mod agent;
pub mod bootstrap;
pub mod error;
pub mod event_feed;
pub mod simulation;

pub use agent::{Autopilot, TurnSummary};
pub use bootstrap::{Seat, SessionBootstrap, SessionConfig, load_engine_config};
pub use error::{Result, RunnerError};
pub use event_feed::EventFeed;
pub use simulation::{Session, SessionResults};
