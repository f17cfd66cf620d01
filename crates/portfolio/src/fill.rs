use bourse_core::{Company, Side};
use bourse_impact::Quote;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TradeKind {
    Buy,
    Sell,
    Short,
    Cover,
}

impl TradeKind {
    /// Market side, which sets the direction of slippage and impact
    pub fn side(&self) -> Side {
        match self {
            TradeKind::Buy | TradeKind::Cover => Side::Buy,
            TradeKind::Sell | TradeKind::Short => Side::Sell,
        }
    }
}

/// How much of a long position to sell
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SellAmount {
    Dollars(f64),
    Shares(f64),
}

/// A booked stock trade
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fill {
    pub company: String,
    pub kind: TradeKind,
    pub shares: f64,
    pub effective_price: f64,
    /// Cash paid or received
    pub total: f64,
    /// Dollars lost to slippage against the live price
    pub slippage_cost: f64,
    /// Multiplier the market applies to the live price afterwards
    pub price_factor: f64,
    /// Debt taken on for a leveraged buy
    pub borrowed: f64,
}

impl Fill {
    pub(crate) fn from_quote(company: &Company, kind: TradeKind, quote: &Quote) -> Self {
        Self {
            company: company.name.clone(),
            kind,
            shares: quote.shares,
            effective_price: quote.effective_price,
            total: quote.total,
            slippage_cost: quote.slippage_cost(company.price()),
            price_factor: quote.price_factor(),
            borrowed: 0.0,
        }
    }
}
