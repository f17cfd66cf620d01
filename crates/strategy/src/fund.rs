//! Hedge funds: player accounts run by a strategy

use bourse_portfolio::Player;
use log::debug;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::aggressive::AggressiveGrowth;
use crate::contrarian::Contrarian;
use crate::signals::random_company;
use crate::strategy::{FundAction, Strategy, StrategyContext};
use crate::value::ValueInvestor;

/// Weekly chance that a fund researches a random company
pub const RESEARCH_PROBABILITY: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FundStyle {
    Aggressive,
    Value,
    Contrarian,
}

impl FundStyle {
    pub fn strategy(&self) -> &'static dyn Strategy {
        match self {
            FundStyle::Aggressive => &AggressiveGrowth,
            FundStyle::Value => &ValueInvestor,
            FundStyle::Contrarian => &Contrarian,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HedgeFund {
    #[serde(flatten)]
    pub account: Player,
    pub strategy: FundStyle,
    #[serde(default = "default_is_npc")]
    pub is_npc: bool,
}

fn default_is_npc() -> bool {
    true
}

impl HedgeFund {
    pub fn new(name: impl Into<String>, strategy: FundStyle) -> Self {
        Self {
            account: Player::new(name),
            strategy,
            is_npc: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.account.name
    }

    /// This week's plan: an occasional research call, then the strategy's trades
    pub fn plan_week(&self, ctx: &StrategyContext<'_>, rng: &mut dyn RngCore) -> Vec<FundAction> {
        let mut actions = Vec::new();
        if !self.account.researched_this_week && rng.gen_bool(RESEARCH_PROBABILITY) {
            if let Some(company) = random_company(ctx, rng) {
                actions.push(FundAction::Research {
                    company: company.name.clone(),
                });
            }
        }
        let strategy = self.strategy.strategy();
        let planned = strategy.on_week(ctx, rng);
        debug!("{} ({}) planned {} action(s)", self.name(), strategy.name(), planned.len());
        actions.extend(planned);
        actions
    }
}

/// The three funds every new game starts with
pub fn default_funds() -> Vec<HedgeFund> {
    vec![
        HedgeFund::new("Apex Capital (NPC)", FundStyle::Aggressive),
        HedgeFund::new("Steadfast Value (NPC)", FundStyle::Value),
        HedgeFund::new("Contrarian Partners (NPC)", FundStyle::Contrarian),
    ]
}
