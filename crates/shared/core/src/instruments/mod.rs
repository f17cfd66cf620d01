mod commodity;
mod company;
mod roster;
mod themed;
mod treasury;
mod void;

pub use commodity::{ElfQueenWater, Gold, GoldCoin, HolyWater};
pub use company::{Company, MEAN_REVERSION_STRENGTH};
pub use roster::{ROSTER, RosterEntry, default_roster, roster_market_cap};
pub use themed::ThemedAssets;
pub use treasury::{QuantumSingularity, Treasury};
pub use void::{CatalystUnavailable, VoidCatalyst, VoidStocks};
