//! Game flow: the market facade, the trade path and the weekly steps

pub(crate) mod desk;
pub mod market;
pub mod reports;
pub(crate) mod week;

pub use market::Market;
pub use reports::{AccountCharges, FundActivity, Standing, WeekOpening, WeekReport};
pub use week::QUANTUM_PAYOUT_INTERVAL;
