use bourse_ports::{ImpactModel, MarketSnapshot};

/// Wraps another model and scales its slippage
///
/// Impact on the live price is left alone; only the trader's fill gets
/// worse. Scaled slippage stops at `cap` so sell fills stay positive.
#[derive(Debug, Clone)]
pub struct SlippagePenalty {
    inner: Box<dyn ImpactModel>,
    multiplier: f64,
    cap: f64,
}

impl SlippagePenalty {
    pub fn new(inner: Box<dyn ImpactModel>, multiplier: f64, cap: f64) -> Self {
        Self {
            inner,
            multiplier,
            cap,
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }
}

impl ImpactModel for SlippagePenalty {
    fn slippage(&self, trade_value: f64, market: &MarketSnapshot) -> f64 {
        (self.inner.slippage(trade_value, market) * self.multiplier).min(self.cap)
    }

    fn impact(&self, trade_value: f64, market: &MarketSnapshot) -> f64 {
        self.inner.impact(trade_value, market)
    }

    fn name(&self) -> &'static str {
        "Slippage Penalty"
    }

    fn box_clone(&self) -> Box<dyn ImpactModel> {
        Box::new(self.clone())
    }
}
