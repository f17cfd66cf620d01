//! Event Feed - turns weekly results into display lines
//!
//! The engine returns structured reports; this is the one place that
//! decides how a headless session prints them.

use bourse_engine::{Standing, WeekOpening, WeekReport};
use bourse_portfolio::LiquidationAction;

use crate::agent::TurnSummary;

/// Lines printed for one week of play
#[derive(Debug, Clone, Default)]
pub struct EventFeed {
    lines: Vec<String>,
}

impl EventFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }

    pub fn opening(&mut self, opening: &WeekOpening) {
        self.lines.push(format!("=== Week {} ===", opening.week));
        for charge in &opening.charges {
            if charge.interest > 0.0 {
                self.lines
                    .push(format!("{} paid ${:.2} interest", charge.account, charge.interest));
            }
            if charge.short_fees > 0.0 {
                self.lines.push(format!(
                    "{} paid ${:.2} short borrow fees",
                    charge.account, charge.short_fees
                ));
            }
            if charge.quantum_income > 0.0 {
                self.lines.push(format!(
                    "{} received ${:.2} from Quantum Singularity",
                    charge.account, charge.quantum_income
                ));
            }
            if charge.margin_call {
                self.lines.push(format!("MARGIN CALL: {}", charge.account));
            }
        }
        for news in &opening.news.published {
            let headline = news.report.lead_headline().unwrap_or("(no coverage)");
            let label = if news.market_movement { "MARKET MOVEMENT" } else { "BREAKING" };
            self.lines.push(format!("{label}: {headline}"));
        }
        for item in opening.gazette.iter().chain(&opening.chronicle) {
            self.lines.push(format!("  {}", item.text));
        }
    }

    pub fn turn(&mut self, turn: &TurnSummary) {
        if let Some((company, hint)) = &turn.research {
            self.lines
                .push(format!("{} researched {company}: {hint}", turn.player));
        }
        for action in &turn.executed {
            self.lines.push(format!("{} {action:?}", turn.player));
        }
    }

    pub fn report(&mut self, report: &WeekReport) {
        for (player, liquidation) in &report.margin_calls {
            let sold = liquidation
                .actions
                .iter()
                .filter(|a| !matches!(a, LiquidationAction::RepaidLoan { .. }))
                .count();
            self.lines.push(format!(
                "{player} was force-liquidated ({sold} position(s)), equity ${:.2}",
                liquidation.final_equity
            ));
        }
        if let Some(cycle) = &report.cycle_started {
            self.lines.push(format!("MARKET CYCLE: {}", cycle.headline));
            self.lines.push(format!("  {}", cycle.description));
        }
        self.lines.extend(report.movement_messages());
        for (player, price) in &report.catalyst_sales {
            self.lines
                .push(format!("{player}'s Void Catalyst sold itself for ${price:.2}"));
        }
        let fund_trades = report.fund_activity.iter().filter(|a| a.fill.is_some()).count();
        if fund_trades > 0 {
            self.lines
                .push(format!("Hedge funds placed {fund_trades} trade(s)"));
        }
    }

    pub fn standings(&mut self, standings: &[Standing]) {
        self.lines.push("--- Standings ---".to_string());
        for (rank, row) in standings.iter().enumerate() {
            let tag = if row.is_npc { " [NPC]" } else { "" };
            self.lines.push(format!(
                "{:>2}. {}{tag}: ${:.2}",
                rank + 1,
                row.name,
                row.net_worth
            ));
        }
    }
}
