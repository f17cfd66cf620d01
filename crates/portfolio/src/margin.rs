//! Margin calls and forced liquidation
//!
//! Liquidation trades at the live price without slippage or market impact.
//! Order: shorts (largest first), then longs (largest first, proceeds
//! repay the loan), then treasury bonds.

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::player::Player;
use crate::valuation::MarketView;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LiquidationAction {
    CoveredShort { company: String, shares: u64, cost: f64 },
    SoldLong { company: String, shares: f64, proceeds: f64 },
    SoldBonds { bonds: u64, proceeds: f64 },
    RepaidLoan { amount: f64 },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Liquidation {
    pub actions: Vec<LiquidationAction>,
    /// Margin call cleared by the end of liquidation
    pub resolved: bool,
    pub final_equity: f64,
}

impl Player {
    /// True when leverage or shorts have eaten through the required margin
    ///
    /// Quantum Singularity holdings do not count toward margin equity.
    pub fn check_margin_call(&self, view: MarketView<'_>) -> bool {
        if self.borrowed_amount <= 0.0 && self.short_positions.is_empty() {
            return false;
        }
        let equity = self.margin_equity(view);

        if self.borrowed_amount > 0.0 {
            let total_position = equity + self.borrowed_amount;
            if total_position > 0.0 && equity / total_position < self.credit.margin_call_threshold {
                return true;
            }
        }

        if !self.short_positions.is_empty() {
            let required = self.short_value(view) * self.credit.short_maintenance_margin;
            if equity < required {
                return true;
            }
        }
        false
    }

    /// Sell positions until the margin call clears or nothing is left
    ///
    /// Returns `None` when no margin call was in effect.
    pub fn force_liquidate(&mut self, view: MarketView<'_>) -> Option<Liquidation> {
        if !self.check_margin_call(view) {
            return None;
        }
        warn!("Margin call for {}, forcing liquidation", self.name);
        let mut actions = Vec::new();

        let mut shorts: Vec<(String, u64, f64)> = self
            .short_positions
            .iter()
            .filter_map(|(name, shares)| {
                view.price(name).map(|p| (name.clone(), *shares, p * *shares as f64))
            })
            .collect();
        shorts.sort_by(|a, b| b.2.total_cmp(&a.2));
        for (company, shares, cost) in shorts {
            if !self.check_margin_call(view) {
                break;
            }
            if cost <= self.cash {
                self.cash -= cost;
                self.short_positions.remove(&company);
                actions.push(LiquidationAction::CoveredShort {
                    company,
                    shares,
                    cost,
                });
            }
        }

        let mut longs: Vec<(String, f64, f64)> = self
            .portfolio
            .iter()
            .filter_map(|(name, shares)| view.price(name).map(|p| (name.clone(), *shares, p * shares)))
            .collect();
        longs.sort_by(|a, b| b.2.total_cmp(&a.2));
        for (company, shares, proceeds) in longs {
            if !self.check_margin_call(view) {
                break;
            }
            self.cash += proceeds;
            self.portfolio.remove(&company);
            actions.push(LiquidationAction::SoldLong {
                company,
                shares,
                proceeds,
            });
            self.repay_from_cash(&mut actions);
        }

        if self.check_margin_call(view) && self.treasury_bonds > 0 {
            let proceeds = self.treasury_bonds as f64 * view.themed.treasury.price;
            self.cash += proceeds;
            actions.push(LiquidationAction::SoldBonds {
                bonds: self.treasury_bonds,
                proceeds,
            });
            self.treasury_bonds = 0;
            self.repay_from_cash(&mut actions);
        }

        let resolved = !self.check_margin_call(view);
        let final_equity = self.margin_equity(view);
        if resolved {
            info!(
                "Margin call for {} resolved, equity ${final_equity:.2}, debt ${:.2}",
                self.name, self.borrowed_amount
            );
        } else {
            warn!(
                "{} still in margin call after liquidation, equity ${final_equity:.2}, debt ${:.2}",
                self.name, self.borrowed_amount
            );
        }
        Some(Liquidation {
            actions,
            resolved,
            final_equity,
        })
    }

    fn repay_from_cash(&mut self, actions: &mut Vec<LiquidationAction>) {
        let amount = self.cash.min(self.borrowed_amount);
        if amount > 0.0 {
            self.borrowed_amount -= amount;
            self.cash -= amount;
            actions.push(LiquidationAction::RepaidLoan { amount });
        }
    }
}
