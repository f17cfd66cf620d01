//! Contrarian: buy fear, sell greed

use bourse_core::CycleKind;
use rand::RngCore;

use crate::signals::{
    Budget, buy, lever_up, random_company, take_short_profits, trim_longs, whole_shares,
};
use crate::strategy::{FundAction, Strategy, StrategyContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct Contrarian;

impl Strategy for Contrarian {
    fn name(&self) -> &str {
        "contrarian"
    }

    fn on_week(&self, ctx: &StrategyContext<'_>, rng: &mut dyn RngCore) -> Vec<FundAction> {
        let mut actions = Vec::new();
        let mut budget = Budget::of(ctx);

        take_short_profits(ctx, &mut budget, &mut actions);
        lever_up(ctx, &mut budget, 1.2, 1_500.0, &mut actions);

        match ctx.cycle {
            Some(cycle) if cycle.is_bearish() => {
                for (name, &shares) in &ctx.fund.short_positions {
                    let cover = (shares as f64 * 0.6).floor() as u64;
                    let Some(company) = ctx.company(name) else {
                        continue;
                    };
                    if cover > 0 {
                        budget.cash -= cover as f64 * company.price();
                        actions.push(FundAction::Cover {
                            company: name.clone(),
                            shares: cover,
                        });
                        break;
                    }
                }
                if budget.cash > 1_000.0 {
                    if let Some(company) = random_company(ctx, rng) {
                        let dollars = (budget.cash * 0.4).min(3_500.0);
                        buy(company, dollars, &mut budget, &mut actions);
                    }
                }
            }
            Some(CycleKind::BullMarket | CycleKind::Recovery) => {
                trim_longs(ctx, 0.5, 0.01, &mut budget, &mut actions);
                let equity = ctx.equity();
                if equity > 1_500.0 {
                    if let Some(company) = random_company(ctx, rng) {
                        let current = ctx.fund.shorted(&company.name) as f64 * company.price();
                        let shares = whole_shares((equity * 0.15).min(1_500.0), company);
                        if current < equity * 0.25 && shares > 0 {
                            actions.push(FundAction::Short {
                                company: company.name.clone(),
                                shares,
                            });
                        }
                    }
                }
            }
            _ => {
                if budget.cash > 1_000.0 {
                    if let Some(company) = random_company(ctx, rng) {
                        let dollars = (budget.cash * 0.25).min(2_500.0);
                        buy(company, dollars, &mut budget, &mut actions);
                    }
                }
            }
        }
        actions
    }
}
