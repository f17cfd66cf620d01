//! Strategy trait and the context it decides from

use bourse_core::{Company, CycleKind};
use bourse_portfolio::{MarketView, Player};
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// One step of a fund's weekly plan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FundAction {
    Research { company: String },
    Borrow { amount: f64 },
    Buy { company: String, dollars: f64 },
    Sell { company: String, shares: f64 },
    Short { company: String, shares: u64 },
    Cover { company: String, shares: u64 },
    BuyTreasury { bonds: u64 },
}

/// Read-only state a strategy plans against
pub struct StrategyContext<'a> {
    pub fund: &'a Player,
    pub market: MarketView<'a>,
    /// Active market cycle, if any
    pub cycle: Option<CycleKind>,
}

impl<'a> StrategyContext<'a> {
    pub fn company(&self, name: &str) -> Option<&'a Company> {
        self.market.companies.get(name)
    }

    pub fn companies(&self) -> impl Iterator<Item = &'a Company> + 'a {
        self.market.companies.values()
    }

    pub fn equity(&self) -> f64 {
        self.fund.equity(self.market)
    }
}

/// A fund's decision rule, called once a week before the market moves
pub trait Strategy: Send + Sync {
    fn name(&self) -> &str;

    fn on_week(&self, ctx: &StrategyContext<'_>, rng: &mut dyn RngCore) -> Vec<FundAction>;
}
