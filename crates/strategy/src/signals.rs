//! Building blocks shared by the built-in strategies

use bourse_core::Company;
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::strategy::{FundAction, StrategyContext};

/// Cash a plan has left after its earlier steps
///
/// Assumes fills at the live price; the market books the real amounts.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Budget {
    pub cash: f64,
}

impl Budget {
    pub fn of(ctx: &StrategyContext<'_>) -> Self {
        Self {
            cash: ctx.fund.cash,
        }
    }
}

/// Borrow toward `equity × target` in steps of at most `cap`
pub(crate) fn lever_up(
    ctx: &StrategyContext<'_>,
    budget: &mut Budget,
    target: f64,
    cap: f64,
    actions: &mut Vec<FundAction>,
) {
    let equity = ctx.equity();
    let ceiling = equity * target;
    if equity <= 0.0 || ctx.fund.borrowed_amount >= ceiling {
        return;
    }
    let amount = cap.min(ceiling - ctx.fund.borrowed_amount);
    if amount > 100.0 {
        budget.cash += amount;
        actions.push(FundAction::Borrow { amount });
    }
}

/// Cover half of one short whose price sits 8% or more under its recent average
pub(crate) fn take_short_profits(
    ctx: &StrategyContext<'_>,
    budget: &mut Budget,
    actions: &mut Vec<FundAction>,
) {
    for (name, &shares) in &ctx.fund.short_positions {
        let Some(company) = ctx.company(name) else {
            continue;
        };
        let history = &company.price_history;
        if shares == 0 || history.len() < 2 {
            continue;
        }
        let recent = &history[history.len().saturating_sub(3)..];
        let average = recent.iter().sum::<f64>() / recent.len() as f64;
        let change_pct = (company.price() - average) / average * 100.0;
        let cover = shares / 2;
        if change_pct < -8.0 && cover > 0 {
            let cost = cover as f64 * company.price();
            if cost <= budget.cash {
                budget.cash -= cost;
                actions.push(FundAction::Cover {
                    company: name.clone(),
                    shares: cover,
                });
                return;
            }
        }
    }
}

/// Companies ordered by volatility, most volatile first
pub(crate) fn by_volatility<'a>(ctx: &StrategyContext<'a>) -> Vec<&'a Company> {
    let mut companies: Vec<&Company> = ctx.companies().collect();
    companies.sort_by(|a, b| b.base_volatility.total_cmp(&a.base_volatility));
    companies
}

pub(crate) fn random_company<'a>(
    ctx: &StrategyContext<'a>,
    rng: &mut dyn RngCore,
) -> Option<&'a Company> {
    let companies: Vec<&Company> = ctx.companies().collect();
    companies.choose(rng).copied()
}

/// Buy `dollars` of `company` if the budget allows
pub(crate) fn buy(company: &Company, dollars: f64, budget: &mut Budget, actions: &mut Vec<FundAction>) {
    if dollars > 0.0 && dollars <= budget.cash {
        budget.cash -= dollars;
        actions.push(FundAction::Buy {
            company: company.name.clone(),
            dollars,
        });
    }
}

/// Sell `fraction` of every long position
pub(crate) fn trim_longs(
    ctx: &StrategyContext<'_>,
    fraction: f64,
    min_shares: f64,
    budget: &mut Budget,
    actions: &mut Vec<FundAction>,
) {
    for (name, &shares) in &ctx.fund.portfolio {
        let Some(company) = ctx.company(name) else {
            continue;
        };
        if shares <= min_shares {
            continue;
        }
        let sell = shares * fraction;
        budget.cash += sell * company.price();
        actions.push(FundAction::Sell {
            company: name.clone(),
            shares: sell,
        });
    }
}

/// Whole shares worth `dollars` at the live price
pub(crate) fn whole_shares(dollars: f64, company: &Company) -> u64 {
    (dollars / company.price()).floor().max(0.0) as u64
}
