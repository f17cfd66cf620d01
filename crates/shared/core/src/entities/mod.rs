mod cycle;
mod liquidity;
mod outlet;
mod sentiment;
mod side;

pub use cycle::CycleKind;
pub use liquidity::LiquidityTier;
pub use outlet::Outlet;
pub use sentiment::Sentiment;
pub use side::Side;
