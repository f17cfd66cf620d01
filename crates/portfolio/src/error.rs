//! Trade rejections
//!
//! These are business outcomes the caller shows to the player, not faults.

use bourse_core::CatalystUnavailable;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum TradeRejection {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Insufficient funds: need ${needed:.2}, have ${available:.2}")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("No position in {0}")]
    NoPosition(String),

    #[error("Insufficient holdings of {asset}: have {held}, requested {requested}")]
    InsufficientHoldings {
        asset: String,
        held: f64,
        requested: f64,
    },

    #[error("Exceeds maximum leverage, at most {max_leverage:.2}x is available")]
    LeverageExceeded { max_leverage: f64 },

    #[error("Exceeds maximum leverage, at most ${available:.2} more can be borrowed")]
    BorrowLimitExceeded { available: f64 },

    #[error("Insufficient equity for short sale: need ${required:.2}, have ${equity:.2}")]
    InsufficientMargin { required: f64, equity: f64 },

    #[error("Void Stocks cannot be bought while in the void state")]
    VoidState,

    #[error("Mystical Lender debt of ${0:.2} is still outstanding")]
    MysticalDebtOutstanding(f64),

    #[error("Nothing is owed to the Mystical Lender")]
    NoMysticalDebt,

    #[error("Already own the Void Catalyst")]
    AlreadyOwnCatalyst,

    #[error(transparent)]
    CatalystUnavailable(#[from] CatalystUnavailable),
}

pub type Result<T> = std::result::Result<T, TradeRejection>;
