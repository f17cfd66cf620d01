use bourse_impact::SquareRootParams;
use bourse_news::NewsConfig;
use bourse_portfolio::{CreditTerms, MysticalLender, STARTING_CASH};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Everything needed to start or resume a game
///
/// None of this is written into save files; a resumed game takes the
/// configuration it is loaded with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seed for the game's random source, entropy when absent
    pub seed: Option<u64>,
    /// Cash every human player starts with
    pub starting_cash: f64,
    pub news: NewsConfig,
    /// Slippage and impact model parameters
    pub impact: SquareRootParams,
    /// Credit terms handed to every new account
    pub credit: CreditTerms,
    /// Terms of the one-off Mystical Lender loan
    pub mystical_lender: MysticalLender,
    /// Add the three NPC hedge funds to new games
    pub hedge_funds: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            starting_cash: STARTING_CASH,
            news: NewsConfig::default(),
            impact: SquareRootParams::default(),
            credit: CreditTerms::default(),
            mystical_lender: MysticalLender::default(),
            hedge_funds: true,
        }
    }
}

impl EngineConfig {
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    /// A quiet market: no breaking news and no NPC funds
    pub fn quiet(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            news: NewsConfig::disabled(),
            hedge_funds: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        self.news.validate()?;
        if !(self.starting_cash >= 0.0) {
            return Err(EngineError::InvalidConfig(format!(
                "starting cash must be non-negative, got {}",
                self.starting_cash
            )));
        }
        if self.credit.max_leverage_ratio < 0.0 {
            return Err(EngineError::InvalidConfig(
                "max leverage ratio must be non-negative".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.credit.margin_call_threshold) {
            return Err(EngineError::InvalidConfig(format!(
                "margin call threshold must be in [0, 1), got {}",
                self.credit.margin_call_threshold
            )));
        }
        let lender = &self.mystical_lender;
        if lender.slippage_multiplier < 1.0 || !(0.0..1.0).contains(&lender.slippage_cap) {
            return Err(EngineError::InvalidConfig(
                "mystical lender needs a multiplier >= 1 and a slippage cap in [0, 1)".into(),
            ));
        }
        if self.impact.impact_cap < 0.0 || self.impact.slippage_cap < 0.0 {
            return Err(EngineError::InvalidConfig("impact caps must be non-negative".into()));
        }
        Ok(())
    }
}
