//! The Mystical Lender
//!
//! A one-off, interest-free loan. The price is paid in execution quality:
//! while any of it is owed, every stock trade slips several times worse.

use bourse_impact::SlippagePenalty;
use bourse_ports::ImpactModel;
use log::info;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TradeRejection};
use crate::player::Player;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MysticalLender {
    /// Cash handed over on acceptance
    pub loan_amount: f64,
    /// Slippage multiplier while the debt is outstanding
    pub slippage_multiplier: f64,
    /// Ceiling on penalized slippage
    pub slippage_cap: f64,
}

impl Default for MysticalLender {
    fn default() -> Self {
        Self {
            loan_amount: 250_000.0,
            slippage_multiplier: 5.0,
            slippage_cap: 0.5,
        }
    }
}

impl Player {
    pub fn owes_mystical_lender(&self) -> bool {
        self.mystical_lender_debt > 0.0
    }

    /// Take the loan; only one may be outstanding at a time
    pub fn accept_mystical_lender(&mut self, lender: &MysticalLender) -> Result<f64> {
        if self.owes_mystical_lender() {
            return Err(TradeRejection::MysticalDebtOutstanding(self.mystical_lender_debt));
        }
        if !(lender.loan_amount > 0.0) {
            return Err(TradeRejection::InvalidAmount(format!("${:.2}", lender.loan_amount)));
        }
        self.cash += lender.loan_amount;
        self.mystical_lender_debt = lender.loan_amount;
        info!("{} accepted ${:.2} from the Mystical Lender", self.name, lender.loan_amount);
        Ok(lender.loan_amount)
    }

    /// Pay back `amount`, or the whole debt when `None`; returns the amount repaid
    pub fn repay_mystical_lender(&mut self, amount: Option<f64>) -> Result<f64> {
        if !self.owes_mystical_lender() {
            return Err(TradeRejection::NoMysticalDebt);
        }
        let amount = amount.unwrap_or(self.mystical_lender_debt);
        if !(amount > 0.0) {
            return Err(TradeRejection::InvalidAmount(format!("${amount:.2}")));
        }
        let repaid = amount.min(self.mystical_lender_debt);
        self.charge(repaid)?;
        self.mystical_lender_debt -= repaid;
        if self.mystical_lender_debt < 0.01 {
            self.mystical_lender_debt = 0.0;
        }
        Ok(repaid)
    }

    /// Model this account's trades are priced with
    ///
    /// Debtors of the Mystical Lender get the lender's slippage penalty.
    pub fn pricing_model(&self, model: &dyn ImpactModel, lender: &MysticalLender) -> Box<dyn ImpactModel> {
        if self.owes_mystical_lender() {
            Box::new(SlippagePenalty::new(
                model.box_clone(),
                lender.slippage_multiplier,
                lender.slippage_cap,
            ))
        } else {
            model.box_clone()
        }
    }
}
