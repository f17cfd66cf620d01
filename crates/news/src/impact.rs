//! Two-stage price impact of a published story
//!
//! A fifth of the move hits the live price on publication; the rest lands
//! in the buffered price for the week the countdown reaches zero. Hoaxes
//! replace the delayed stage with a small move back the other way.

use bourse_core::{Company, Price, Sentiment};
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::report::NewsReport;

/// Share of the magnitude applied the moment a story is published
pub const INSTANT_FRACTION: f64 = 0.20;

/// Tail of the message emitted when a hoax resolves
pub const HOAX_MESSAGE_SUFFIX: &str = "were exaggerated. Stock adjusts slightly.";

/// Hoax correction assumed for records saved without one
const FALLBACK_HOAX_REVERSAL: f64 = 2.0;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingNewsImpact {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    pub company_name: String,
    pub sentiment: Sentiment,
    /// Signed percent, negative for bad news
    pub impact_magnitude: f64,
    /// Weeks until the delayed stage lands; only the ledger decrements it
    pub weeks_until_impact: u32,
    #[serde(default = "default_is_real")]
    pub is_real: bool,
    #[serde(default)]
    pub instant_impact_applied: bool,
    /// Percent the price corrects when a hoax resolves, drawn once
    #[serde(default)]
    pub hoax_reversal: Option<f64>,
    #[serde(default)]
    pub news_text: String,
    #[serde(default)]
    pub news_report: NewsReport,
}

fn default_is_real() -> bool {
    true
}

impl PendingNewsImpact {
    /// A real impact whose instant stage has not run yet
    pub fn new(
        company_name: impl Into<String>,
        sentiment: Sentiment,
        impact_magnitude: f64,
        weeks_until_impact: u32,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            company_name: company_name.into(),
            sentiment,
            impact_magnitude,
            weeks_until_impact,
            is_real: true,
            instant_impact_applied: false,
            hoax_reversal: None,
            news_text: String::new(),
            news_report: NewsReport::default(),
        }
    }

    /// Turn this into a hoax that corrects by `reversal` percent
    pub fn hoax(mut self, reversal: f64) -> Self {
        self.is_real = false;
        self.hoax_reversal = Some(reversal);
        self
    }

    pub fn with_report(mut self, news_text: impl Into<String>, report: NewsReport) -> Self {
        self.news_text = news_text.into();
        self.news_report = report;
        self
    }

    pub fn instant_magnitude(&self) -> f64 {
        self.impact_magnitude * INSTANT_FRACTION
    }

    /// Percent still owed by the delayed stage
    pub fn remaining_magnitude(&self) -> f64 {
        if self.instant_impact_applied {
            self.impact_magnitude * (1.0 - INSTANT_FRACTION)
        } else {
            self.impact_magnitude
        }
    }

    /// Move the live price by the instant share of the magnitude
    ///
    /// Runs at most once per impact; returns the new price, or `None` when
    /// the instant stage already ran.
    pub fn apply_instant(&mut self, company: &mut Company) -> Option<Price> {
        if self.instant_impact_applied {
            return None;
        }
        let factor = 1.0 + self.instant_magnitude() / 100.0;
        company.set_price(company.price() * factor);
        self.instant_impact_applied = true;
        Some(company.price())
    }

    pub fn reversal(&self) -> f64 {
        self.hoax_reversal.unwrap_or(FALLBACK_HOAX_REVERSAL)
    }

    /// Price multiplier of the delayed stage
    pub fn delayed_factor(&self) -> f64 {
        if self.is_real {
            1.0 + self.remaining_magnitude() / 100.0
        } else {
            1.0 - self.sentiment.sign() * self.reversal() / 100.0
        }
    }

    /// Draw a reversal for a hoax that was saved without one
    pub fn ensure_reversal<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) {
        if !self.is_real && self.hoax_reversal.is_none() {
            self.hoax_reversal = Some(rng.gen_range(min..=max));
        }
    }

    /// Player-facing message for the week the delayed stage lands
    pub fn resolution_message(&self) -> String {
        if !self.is_real {
            return format!("Earlier reports about {} {}", self.company_name, HOAX_MESSAGE_SUFFIX);
        }
        let pct = self.remaining_magnitude().abs();
        match self.sentiment {
            Sentiment::Positive => format!(
                "MARKET IMPACT: {} surges {:.1}% following recent positive news!",
                self.company_name, pct
            ),
            Sentiment::Negative => format!(
                "MARKET IMPACT: {} drops {:.1}% following recent negative news!",
                self.company_name, pct
            ),
        }
    }
}
