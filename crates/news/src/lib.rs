//! Bourse News
//!
//! Company events, the outlets that report them and the ledger of price
//! impacts they schedule.
//!
//! An event moves through one state machine:
//! private event → published impact → instant stage → delayed stage →
//! real-or-hoax resolution. Each stage runs exactly once; the
//! `instant_impact_applied` flag survives save/load so a reload never
//! repeats the instant move.

pub mod breaking;
pub mod config;
pub mod error;
pub mod event;
pub mod gazette;
pub mod impact;
pub mod ledger;
pub mod outlets;
pub mod report;
mod templates;

pub use breaking::{BreakingNewsDigest, BreakingNewsEngine, InsiderTip, PublishedNews};
pub use config::NewsConfig;
pub use error::{NewsError, Result};
pub use event::{CompanyEvent, EventType};
pub use gazette::{Gazette, GazetteItem, GazetteKind, trust_ratio};
pub use impact::{HOAX_MESSAGE_SUFFIX, INSTANT_FRACTION, PendingNewsImpact};
pub use ledger::ImpactLedger;
pub use outlets::{OutletPolicy, OutletStyle, default_outlets};
pub use report::NewsReport;
