//! Company stock model
//!
//! A company owns its live price, the fixed share count and the floating
//! market cap derived from them. `total_shares` is set once when the company
//! is created and never changes afterwards.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::entities::LiquidityTier;
use crate::values::{Price, floor_price};

/// Fraction of the gap to the fundamental price closed each quiet week
pub const MEAN_REVERSION_STRENGTH: f64 = 0.30;

/// A publicly traded company
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub name: String,
    pub industry: String,
    price: Price,
    pub base_volatility: f64,
    #[serde(alias = "liquidity")]
    pub liquidity_tier: LiquidityTier,
    #[serde(default)]
    market_cap: f64,
    #[serde(default)]
    total_shares: u64,
    #[serde(default)]
    pub fundamental_price: Price,
    #[serde(default)]
    pub earnings_per_share: f64,
    #[serde(default)]
    pub price_history: Vec<Price>,
    /// Hidden research fundamental in [0.3, 0.9]
    #[serde(default = "default_true_strength")]
    pub true_strength: f64,
    /// Hidden analyst mood: -1 bearish, 0 neutral, 1 bullish
    #[serde(default)]
    pub hidden_sentiment: i8,
}

fn default_true_strength() -> f64 {
    0.6
}

impl Company {
    /// Create a company, deriving the share count from `market_cap / initial_price`
    ///
    /// Hidden fundamentals are drawn from `rng`.
    pub fn new(
        name: impl Into<String>,
        industry: impl Into<String>,
        initial_price: Price,
        volatility: f64,
        liquidity_tier: LiquidityTier,
        market_cap: f64,
        rng: &mut impl Rng,
    ) -> Self {
        let price = floor_price(initial_price);
        let total_shares = (market_cap / price).floor().max(0.0) as u64;
        Self {
            name: name.into(),
            industry: industry.into(),
            price,
            base_volatility: volatility,
            liquidity_tier,
            market_cap: price * total_shares as f64,
            total_shares,
            fundamental_price: price,
            earnings_per_share: price / 20.0,
            price_history: vec![price],
            true_strength: rng.gen_range(0.3..0.9),
            hidden_sentiment: rng.gen_range(-1..=1),
        }
    }

    /// Override the hidden research fundamentals
    pub fn with_fundamentals(mut self, true_strength: f64, hidden_sentiment: i8) -> Self {
        self.true_strength = true_strength;
        self.hidden_sentiment = hidden_sentiment.clamp(-1, 1);
        self
    }

    pub fn price(&self) -> Price {
        self.price
    }

    pub fn total_shares(&self) -> u64 {
        self.total_shares
    }

    pub fn market_cap(&self) -> f64 {
        self.market_cap
    }

    /// Set the live price (floored) and refresh the market cap
    pub fn set_price(&mut self, price: Price) {
        self.price = floor_price(price);
        self.market_cap = self.price * self.total_shares as f64;
    }

    /// Set the live price and append it to the history
    pub fn record_price(&mut self, price: Price) {
        self.set_price(price);
        self.price_history.push(self.price);
    }

    /// Scale the live price by `factor`, returning the applied ratio
    ///
    /// The ratio differs from `factor` only when the floor kicks in.
    pub fn rescale(&mut self, factor: f64) -> f64 {
        let before = self.price;
        self.set_price(before * factor);
        self.price / before
    }

    /// One random-walk multiplier: `1 + U(-vol, vol) / 100`
    pub fn walk_factor(&self, rng: &mut impl Rng) -> f64 {
        if self.base_volatility <= 0.0 {
            return 1.0;
        }
        let change = rng.gen_range(-self.base_volatility..=self.base_volatility);
        1.0 + change / 100.0
    }

    /// Apply one random-walk step to the live price and record it
    pub fn advance_price(&mut self, rng: &mut impl Rng) {
        let factor = self.walk_factor(rng);
        self.record_price(self.price * factor);
    }

    /// Pull `price` toward the fundamental price
    pub fn mean_revert(&self, price: Price) -> Price {
        if self.fundamental_price > 0.0 {
            price + (self.fundamental_price - price) * MEAN_REVERSION_STRENGTH
        } else {
            price
        }
    }

    /// Repair a company loaded without a share count
    ///
    /// Uses the stored market cap, or `fallback_cap` when that is missing too.
    /// Returns true when the share count was rebuilt.
    pub fn normalize_shares(&mut self, fallback_cap: Option<f64>) -> bool {
        if self.total_shares > 0 {
            self.market_cap = self.price * self.total_shares as f64;
            return false;
        }
        let cap = if self.market_cap > 0.0 {
            self.market_cap
        } else {
            fallback_cap.unwrap_or(0.0)
        };
        self.total_shares = (cap / self.price).floor().max(0.0) as u64;
        self.market_cap = self.price * self.total_shares as f64;
        true
    }

    /// Price one week ago, if known
    pub fn previous_price(&self) -> Option<Price> {
        let len = self.price_history.len();
        if len >= 2 {
            Some(self.price_history[len - 2])
        } else {
            None
        }
    }
}
