//! Aggressive growth: high leverage, momentum in the most volatile names

use rand::RngCore;

use crate::signals::{Budget, buy, by_volatility, lever_up, take_short_profits, trim_longs, whole_shares};
use crate::strategy::{FundAction, Strategy, StrategyContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct AggressiveGrowth;

impl AggressiveGrowth {
    /// Targets the most volatile companies
    const TARGETS: usize = 2;
}

impl Strategy for AggressiveGrowth {
    fn name(&self) -> &str {
        "aggressive"
    }

    fn on_week(&self, ctx: &StrategyContext<'_>, _rng: &mut dyn RngCore) -> Vec<FundAction> {
        let mut actions = Vec::new();
        let mut budget = Budget::of(ctx);

        take_short_profits(ctx, &mut budget, &mut actions);
        lever_up(ctx, &mut budget, 1.5, 2_000.0, &mut actions);

        let targets: Vec<_> = by_volatility(ctx).into_iter().take(Self::TARGETS).collect();
        match ctx.cycle {
            Some(cycle) if cycle.is_bullish() => {
                // cut losing shorts, one name a week
                for (name, &shares) in &ctx.fund.short_positions {
                    let Some(company) = ctx.company(name) else {
                        continue;
                    };
                    let affordable = (budget.cash / (company.price() * 1.01)).floor().max(0.0) as u64;
                    let cover = shares.min((shares / 2).max(affordable));
                    if cover > 0 {
                        budget.cash -= cover as f64 * company.price();
                        actions.push(FundAction::Cover {
                            company: name.clone(),
                            shares: cover,
                        });
                        break;
                    }
                }
                for company in &targets {
                    if budget.cash > 1_000.0 {
                        let dollars = (budget.cash * 0.3).min(3_000.0);
                        buy(company, dollars, &mut budget, &mut actions);
                    }
                }
            }
            Some(cycle) if cycle.is_bearish() => {
                trim_longs(ctx, 0.4, 0.0, &mut budget, &mut actions);
                let equity = ctx.equity();
                if equity > 1_000.0 {
                    for company in &targets {
                        let current = ctx.fund.shorted(&company.name) as f64 * company.price();
                        if current < equity * 0.3 {
                            let shares = whole_shares((equity * 0.2).min(2_000.0), company);
                            if shares > 0 {
                                actions.push(FundAction::Short {
                                    company: company.name.clone(),
                                    shares,
                                });
                                break;
                            }
                        }
                    }
                }
            }
            _ => {
                if budget.cash > 1_000.0 {
                    if let Some(company) = targets.first() {
                        let dollars = (budget.cash * 0.2).min(2_000.0);
                        buy(company, dollars, &mut budget, &mut actions);
                    }
                }
            }
        }
        actions
    }
}
