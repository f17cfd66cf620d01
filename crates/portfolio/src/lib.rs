//! Bourse Portfolio
//!
//! Player accounts and everything that changes them:
//! - **Trades**: dollar or share sized buys and sells priced through an
//!   [`bourse_ports::ImpactModel`], short sales and covers
//! - **Credit**: borrowing, leveraged buys, weekly interest and short fees,
//!   plus the Mystical Lender's slippage-penalized loan
//! - **Themed holdings**: bonds, commodities, Void Stocks and the Void Catalyst
//! - **Margin**: margin-call checks and forced liquidation
//!
//! Trades never move the live price themselves. Each [`Fill`] carries the
//! price factor the market applies once the trade is booked.

mod credit;
mod error;
mod fill;
mod lender;
mod margin;
mod player;
mod themed;
mod valuation;

pub use credit::CreditTerms;
pub use error::{Result, TradeRejection};
pub use fill::{Fill, SellAmount, TradeKind};
pub use lender::MysticalLender;
pub use margin::{Liquidation, LiquidationAction};
pub use player::{Player, STARTING_CASH};
pub use themed::{CatalystPurchase, ThemedAsset, ThemedFill};
pub use valuation::MarketView;
