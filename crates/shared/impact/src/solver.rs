//! Dollar-to-share solving
//!
//! Slippage depends on trade size and trade size depends on the fill
//! price, so the share count is found by fixed-point iteration.

use bourse_core::Side;
use bourse_ports::{ImpactModel, MarketSnapshot};
use log::warn;
use serde::{Deserialize, Serialize};

/// Convergence settings for the share solver
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Relative change in share count treated as converged
    pub tolerance: f64,
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-9,
            max_iterations: 50,
        }
    }
}

/// Priced trade ready to be booked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub side: Side,
    pub shares: f64,
    /// Fill price per share after slippage
    pub effective_price: f64,
    /// Cash exchanged for the whole trade
    pub total: f64,
    /// Slippage fraction applied to the fill
    pub slippage: f64,
    /// Fraction the live price moves afterwards
    pub impact: f64,
    pub iterations: usize,
}

impl Quote {
    /// Dollars lost to slippage relative to the live price
    pub fn slippage_cost(&self, live_price: f64) -> f64 {
        (self.effective_price - live_price).abs() * self.shares
    }

    /// Multiplier to apply to the live price once the trade is booked
    pub fn price_factor(&self) -> f64 {
        1.0 + self.side.direction() * self.impact
    }
}

fn fill_price(side: Side, price: f64, slippage: f64) -> f64 {
    price * (1.0 + side.direction() * slippage)
}

fn solve(
    model: &dyn ImpactModel,
    side: Side,
    dollars: f64,
    market: &MarketSnapshot,
    max_shares: Option<f64>,
    config: SolverConfig,
) -> Quote {
    let cap = |shares: f64| max_shares.map_or(shares, |m| shares.min(m));
    let mut shares = cap(dollars / market.price);
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iterations {
        iterations += 1;
        let slippage = model.slippage(shares * market.price, market);
        let next = cap(dollars / fill_price(side, market.price, slippage));
        let delta = (next - shares).abs();
        shares = next;
        if delta <= config.tolerance * shares.max(1.0) {
            converged = true;
            break;
        }
    }
    if !converged {
        warn!(
            "share solver hit {} iterations for ${:.2} ({:?})",
            config.max_iterations, dollars, side
        );
    }

    let notional = shares * market.price;
    let slippage = model.slippage(notional, market);
    let effective_price = fill_price(side, market.price, slippage);
    // Uncapped solves exchange exactly the requested dollars
    let total = if max_shares.is_some_and(|m| shares >= m) {
        effective_price * shares
    } else {
        dollars
    };

    Quote {
        side,
        shares,
        effective_price,
        total,
        slippage,
        impact: model.impact(notional, market),
        iterations,
    }
}

/// Shares bought with `dollars`, charging exactly `dollars`
pub fn solve_buy(model: &dyn ImpactModel, dollars: f64, market: &MarketSnapshot) -> Quote {
    solve(model, Side::Buy, dollars, market, None, SolverConfig::default())
}

/// Shares sold to raise `dollars`, never more than `held`
pub fn solve_sell(
    model: &dyn ImpactModel,
    dollars: f64,
    held: f64,
    market: &MarketSnapshot,
) -> Quote {
    solve(
        model,
        Side::Sell,
        dollars,
        market,
        Some(held),
        SolverConfig::default(),
    )
}

/// Price a trade of a known share count
pub fn quote_shares(
    model: &dyn ImpactModel,
    side: Side,
    shares: f64,
    market: &MarketSnapshot,
) -> Quote {
    let notional = shares * market.price;
    let slippage = model.slippage(notional, market);
    let effective_price = fill_price(side, market.price, slippage);
    Quote {
        side,
        shares,
        effective_price,
        total: effective_price * shares,
        slippage,
        impact: model.impact(notional, market),
        iterations: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{SquareRootModel, ZeroImpact};
    use approx::assert_relative_eq;
    use bourse_core::LiquidityTier;

    fn make_market(tier: LiquidityTier) -> MarketSnapshot {
        MarketSnapshot {
            price: 100.0,
            market_cap: 10_000_000_000.0,
            liquidity_tier: tier,
            volatility: 7.5,
        }
    }

    #[test]
    fn test_zero_impact_fractional_buy() {
        let quote = solve_buy(&ZeroImpact, 250.0, &make_market(LiquidityTier::Medium));
        assert_eq!(quote.shares, 2.5);
        assert_eq!(quote.total, 250.0);
        assert_eq!(quote.effective_price, 100.0);
        assert_eq!(quote.price_factor(), 1.0);
    }

    #[test]
    fn test_buy_converges_to_fixed_point() {
        let model = SquareRootModel::default_model();
        let market = make_market(LiquidityTier::Low);
        let quote = solve_buy(&model, 2_000_000.0, &market);

        assert!(quote.iterations < 50);
        assert!(quote.effective_price > market.price);
        let implied = model.slippage(quote.shares * market.price, &market);
        assert_relative_eq!(
            quote.shares,
            2_000_000.0 / (market.price * (1.0 + implied)),
            max_relative = 1e-8
        );
        assert_eq!(quote.total, 2_000_000.0);
    }

    #[test]
    fn test_sell_capped_by_holdings() {
        let model = SquareRootModel::default_model();
        let market = make_market(LiquidityTier::Medium);
        let quote = solve_sell(&model, 1_000_000.0, 12.0, &market);
        assert_eq!(quote.shares, 12.0);
        assert!(quote.effective_price <= market.price);
        assert_relative_eq!(quote.total, quote.effective_price * 12.0);
    }

    #[test]
    fn test_quote_shares_directions() {
        let model = SquareRootModel::default_model();
        let market = make_market(LiquidityTier::High);
        let buy = quote_shares(&model, Side::Buy, 50_000.0, &market);
        let sell = quote_shares(&model, Side::Sell, 50_000.0, &market);
        assert!(buy.effective_price > 100.0);
        assert!(sell.effective_price < 100.0);
        assert!(buy.price_factor() > 1.0);
        assert!(sell.price_factor() < 1.0);
        assert_relative_eq!(buy.slippage_cost(100.0), sell.slippage_cost(100.0));
    }
}
