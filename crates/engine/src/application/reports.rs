//! Structured results handed back to the caller
//!
//! The engine never formats for display; these carry the numbers and the
//! texts a front end needs.

use bourse_core::{CycleKind, Week};
use bourse_news::{BreakingNewsDigest, GazetteItem, PendingNewsImpact};
use bourse_portfolio::{Fill, Liquidation};
use bourse_strategy::FundAction;

use crate::cycle::{ActiveMarketCycle, cycle_ended_message};

/// Weekly carrying costs and income booked for one account
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AccountCharges {
    pub account: String,
    pub interest: f64,
    pub short_fees: f64,
    pub quantum_income: f64,
    /// Account is under a margin call after the charges
    pub margin_call: bool,
}

/// Everything that happened when a week opened
#[derive(Debug, Clone, Default)]
pub struct WeekOpening {
    pub week: Week,
    pub charges: Vec<AccountCharges>,
    pub news: BreakingNewsDigest,
    pub gazette: Vec<GazetteItem>,
    pub chronicle: Vec<GazetteItem>,
}

/// One executed step of a fund's plan
#[derive(Debug, Clone, PartialEq)]
pub struct FundActivity {
    pub fund: String,
    pub action: FundAction,
    /// Fill for stock trades
    pub fill: Option<Fill>,
}

/// Everything that happened when the market moved to the next week
#[derive(Debug, Clone, Default)]
pub struct WeekReport {
    /// The week the market has moved into
    pub week: Week,
    pub margin_calls: Vec<(String, Liquidation)>,
    pub fund_activity: Vec<FundActivity>,
    pub fund_charges: Vec<AccountCharges>,
    pub cycle_started: Option<ActiveMarketCycle>,
    pub cycle_ended: Option<CycleKind>,
    /// Impacts whose delayed stage landed this week
    pub resolved: Vec<PendingNewsImpact>,
    /// `(player, price)` for each Void Catalyst auto-sale
    pub catalyst_sales: Vec<(String, f64)>,
}

impl WeekReport {
    /// Display lines for the week's market movements, cycle first
    pub fn movement_messages(&self) -> Vec<String> {
        let mut messages = Vec::new();
        if let Some(kind) = self.cycle_ended {
            messages.push(cycle_ended_message(kind));
        }
        messages.extend(self.resolved.iter().map(PendingNewsImpact::resolution_message));
        messages
    }
}

/// One row of the leaderboard
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub name: String,
    pub net_worth: f64,
    pub is_npc: bool,
}
