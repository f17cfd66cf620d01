//! Square-root slippage and impact
//!
//! ```text
//! daily_volume = market_cap × volume_pct(tier)
//! trade_pct    = max(trade_value / daily_volume, min_trade_pct)
//! raw          = √trade_pct × coefficient × tier_multiplier
//! cost         = raw × clamp(σ / σ_base, 0.6, 1.6) × min(1, trade_value / threshold)
//! ```
//! Slippage and impact share the shape but use different coefficients and
//! caps, so a trader always pays at least the move they cause.

use bourse_ports::{ImpactModel, MarketSnapshot};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Parameters for the square-root model (MEDIUM-liquidity baseline)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SquareRootParams {
    pub slippage_coefficient: f64,
    pub impact_coefficient: f64,
    /// Smallest participation considered, as a fraction of daily volume
    pub min_trade_pct: f64,
    /// Volatility (percent) at which the volatility scale is 1.0
    pub baseline_volatility: f64,
    pub min_volatility_scale: f64,
    pub max_volatility_scale: f64,
    /// Trades below this notional are dampened linearly
    pub notional_threshold: f64,
    pub slippage_cap: f64,
    pub impact_cap: f64,
}

impl Default for SquareRootParams {
    fn default() -> Self {
        Self {
            slippage_coefficient: 0.35,
            impact_coefficient: 0.25,
            min_trade_pct: 0.00005,
            baseline_volatility: 7.5,
            min_volatility_scale: 0.6,
            max_volatility_scale: 1.6,
            notional_threshold: 1_000_000.0,
            slippage_cap: 0.25, // 25%
            impact_cap: 0.05,   // 5%
        }
    }
}

impl SquareRootParams {
    /// Harsher costs for stress scenarios
    pub fn illiquid() -> Self {
        Self {
            slippage_coefficient: 0.6,
            impact_coefficient: 0.45,
            notional_threshold: 250_000.0,
            ..Default::default()
        }
    }
}

/// Square-root market impact model
#[derive(Debug, Clone)]
pub struct SquareRootModel {
    params: SquareRootParams,
}

impl SquareRootModel {
    pub fn new(params: SquareRootParams) -> Self {
        Self { params }
    }

    pub fn default_model() -> Self {
        Self::new(SquareRootParams::default())
    }

    pub fn params(&self) -> &SquareRootParams {
        &self.params
    }

    fn scaled(&self, trade_value: f64, market: &MarketSnapshot, coefficient: f64, cap: f64) -> f64 {
        if trade_value <= 0.0 {
            return 0.0;
        }
        let daily_volume = market.market_cap * market.liquidity_tier.daily_volume_pct();
        if daily_volume <= 0.0 {
            return cap;
        }

        let p = &self.params;
        let trade_pct = (trade_value / daily_volume).max(p.min_trade_pct);
        let raw = trade_pct.sqrt() * coefficient * market.liquidity_tier.coefficient_multiplier();
        let vol_scale = (market.volatility / p.baseline_volatility)
            .clamp(p.min_volatility_scale, p.max_volatility_scale);
        let dampen = (trade_value / p.notional_threshold).min(1.0);

        (raw * vol_scale * dampen).min(cap)
    }
}

impl Default for SquareRootModel {
    fn default() -> Self {
        Self::default_model()
    }
}

impl ImpactModel for SquareRootModel {
    fn slippage(&self, trade_value: f64, market: &MarketSnapshot) -> f64 {
        self.scaled(
            trade_value,
            market,
            self.params.slippage_coefficient,
            self.params.slippage_cap,
        )
    }

    fn impact(&self, trade_value: f64, market: &MarketSnapshot) -> f64 {
        self.scaled(
            trade_value,
            market,
            self.params.impact_coefficient,
            self.params.impact_cap,
        )
    }

    fn name(&self) -> &'static str {
        "Square Root"
    }

    fn box_clone(&self) -> Box<dyn ImpactModel> {
        Box::new(self.clone())
    }
}

impl fmt::Display for SquareRootModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "SquareRoot(slip={}, impact={}, caps={}/{})",
            self.params.slippage_coefficient,
            self.params.impact_coefficient,
            self.params.slippage_cap,
            self.params.impact_cap
        )
    }
}
