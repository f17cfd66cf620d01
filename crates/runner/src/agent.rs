//! Autopilot - plays a human seat with a fund strategy
//!
//! Each week the autopilot plans against the same read-only context the
//! hedge funds use, then places the plan through the player operations of
//! [`Market`], so trades pay slippage and move prices like any other.

use bourse_engine::{EngineError, Market};
use bourse_portfolio::SellAmount;
use bourse_strategy::{FundAction, RESEARCH_PROBABILITY, StrategyContext};
use log::debug;
use rand::rngs::StdRng;
use rand::seq::IteratorRandom;
use rand::{Rng, SeedableRng};

use crate::bootstrap::Seat;

/// Outcome of one seat's turn
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TurnSummary {
    pub player: String,
    pub executed: Vec<FundAction>,
    pub rejected: usize,
    pub research: Option<(String, String)>,
}

pub struct Autopilot {
    seat: Seat,
    rng: StdRng,
}

impl Autopilot {
    pub fn new(seat: Seat, seed: u64) -> Self {
        Self {
            seat,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn player(&self) -> &str {
        &self.seat.player
    }

    /// Research, then trade for this week
    pub fn take_turn(&mut self, market: &mut Market) -> Result<TurnSummary, EngineError> {
        let mut summary = TurnSummary {
            player: self.seat.player.clone(),
            ..Default::default()
        };

        if self.rng.gen_bool(RESEARCH_PROBABILITY) {
            let company = market.companies().keys().choose(&mut self.rng).cloned();
            if let Some(company) = company {
                match market.research(&self.seat.player, &company) {
                    Ok(hint) => summary.research = Some((company, hint)),
                    Err(err) => debug!("{} skipped research: {err}", self.seat.player),
                }
            }
        }

        let plan = {
            let state = market.state();
            let ctx = StrategyContext {
                fund: state.player(&self.seat.player)?,
                market: state.view(),
                cycle: state.market_cycle.kind(),
            };
            self.seat.style.strategy().on_week(&ctx, &mut self.rng)
        };

        for action in plan {
            match place(market, &self.seat.player, &action) {
                Ok(()) => summary.executed.push(action),
                Err(err) => {
                    debug!("{} skipped {:?}: {err}", self.seat.player, action);
                    summary.rejected += 1;
                }
            }
        }
        Ok(summary)
    }
}

fn place(market: &mut Market, player: &str, action: &FundAction) -> Result<(), EngineError> {
    match action {
        FundAction::Research { company } => market.research(player, company).map(|_| ()),
        FundAction::Borrow { amount } => market.borrow(player, *amount),
        FundAction::Buy { company, dollars } => market.buy_stock(player, company, *dollars, 1.0).map(|_| ()),
        FundAction::Sell { company, shares } => market
            .sell_stock(player, company, SellAmount::Shares(*shares))
            .map(|_| ()),
        FundAction::Short { company, shares } => market.short_sell(player, company, *shares).map(|_| ()),
        FundAction::Cover { company, shares } => market.cover_short(player, company, *shares).map(|_| ()),
        FundAction::BuyTreasury { bonds } => market.buy_treasury(player, *bonds).map(|_| ()),
    }
}
