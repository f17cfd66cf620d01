use bourse_core::{Company, LiquidityTier, Price};
use serde::{Deserialize, Serialize};

/// Market inputs a trade is priced against
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    pub price: Price,
    pub market_cap: f64,
    pub liquidity_tier: LiquidityTier,
    /// Weekly volatility in percent
    pub volatility: f64,
}

impl MarketSnapshot {
    pub fn of(company: &Company) -> Self {
        Self {
            price: company.price(),
            market_cap: company.market_cap(),
            liquidity_tier: company.liquidity_tier,
            volatility: company.base_volatility,
        }
    }
}

/// Cost fractions for a single trade
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeCost {
    /// Fraction the fill price moves against the trader
    pub slippage: f64,
    /// Fraction the live price moves after the trade
    pub impact: f64,
}

/// Port for trade cost models
///
/// Both fractions are unsigned; the caller applies them in the trade's
/// direction. Implementations must be pure so that dollar-to-share solving
/// can iterate them freely.
pub trait ImpactModel: Send + Sync {
    /// Fraction by which the trader's fill is worse than the live price
    fn slippage(&self, trade_value: f64, market: &MarketSnapshot) -> f64;

    /// Fraction by which the live price moves after the trade
    fn impact(&self, trade_value: f64, market: &MarketSnapshot) -> f64;

    /// Both fractions at once
    fn cost(&self, trade_value: f64, market: &MarketSnapshot) -> TradeCost {
        TradeCost {
            slippage: self.slippage(trade_value, market),
            impact: self.impact(trade_value, market),
        }
    }

    /// Model name for logging/display
    fn name(&self) -> &'static str;

    /// Clone into boxed trait object
    fn box_clone(&self) -> Box<dyn ImpactModel>;
}

impl Clone for Box<dyn ImpactModel> {
    fn clone(&self) -> Self {
        self.box_clone()
    }
}

impl std::fmt::Debug for Box<dyn ImpactModel> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ImpactModel({})", self.name())
    }
}
