use bourse_ports::{ImpactModel, MarketSnapshot};

/// Frictionless model: every trade fills at the live price and moves nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroImpact;

impl ImpactModel for ZeroImpact {
    fn slippage(&self, _trade_value: f64, _market: &MarketSnapshot) -> f64 {
        0.0
    }

    fn impact(&self, _trade_value: f64, _market: &MarketSnapshot) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "Zero"
    }

    fn box_clone(&self) -> Box<dyn ImpactModel> {
        Box::new(*self)
    }
}
