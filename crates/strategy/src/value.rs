//! Value investing: light leverage, stable liquid names, bonds in a downturn

use bourse_core::{Company, CycleKind, LiquidityTier};
use rand::RngCore;
use rand::seq::SliceRandom;

use crate::signals::{Budget, buy, lever_up, take_short_profits};
use crate::strategy::{FundAction, Strategy, StrategyContext};

#[derive(Debug, Clone, Copy, Default)]
pub struct ValueInvestor;

impl ValueInvestor {
    /// Low-volatility, highly liquid names, widening to medium liquidity if none qualify
    fn stable<'a>(ctx: &StrategyContext<'a>) -> Vec<&'a Company> {
        let strict: Vec<&Company> = ctx
            .companies()
            .filter(|c| c.base_volatility < 7.0 && c.liquidity_tier == LiquidityTier::High)
            .collect();
        if !strict.is_empty() {
            return strict;
        }
        ctx.companies()
            .filter(|c| {
                c.base_volatility < 8.0
                    && matches!(c.liquidity_tier, LiquidityTier::High | LiquidityTier::Medium)
            })
            .collect()
    }
}

impl Strategy for ValueInvestor {
    fn name(&self) -> &str {
        "value"
    }

    fn on_week(&self, ctx: &StrategyContext<'_>, rng: &mut dyn RngCore) -> Vec<FundAction> {
        let mut actions = Vec::new();
        let mut budget = Budget::of(ctx);

        take_short_profits(ctx, &mut budget, &mut actions);
        lever_up(ctx, &mut budget, 0.8, 1_000.0, &mut actions);

        if budget.cash > 1_000.0 {
            if let Some(company) = Self::stable(ctx).choose(rng) {
                let dollars = (budget.cash * 0.2).min(2_000.0);
                buy(company, dollars, &mut budget, &mut actions);
            }
        }

        if matches!(ctx.cycle, Some(CycleKind::MarketCrash | CycleKind::Recession))
            && budget.cash > 500.0
        {
            let price = ctx.market.themed.treasury.price;
            let bonds = (budget.cash * 0.3 / price).floor() as u64;
            if bonds > 0 {
                actions.push(FundAction::BuyTreasury { bonds });
            }
        }
        actions
    }
}
