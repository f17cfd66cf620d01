use serde::{Deserialize, Serialize};

use crate::error::{NewsError, Result};

/// Tuning for breaking-news generation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsConfig {
    /// Weekly chance that a company has something happen to it
    pub event_probability: f64,
    /// P(success) = true_strength × this
    pub success_multiplier: f64,
    /// Fixed chance of a PROBLEM event, scandals take the rest
    pub problem_probability: f64,
    pub min_severity: f64,
    pub max_severity: f64,
    /// Base move in percent before severity scaling
    pub min_base_magnitude: f64,
    pub max_base_magnitude: f64,
    /// Weeks an event stays private
    pub min_disclosure_delay: u32,
    pub max_disclosure_delay: u32,
    /// Weeks from publication until the delayed stage lands
    pub min_impact_delay: u32,
    pub max_impact_delay: u32,
    /// Chance a published story is real rather than a hoax
    pub real_probability: f64,
    /// Size in percent of the correction when a hoax resolves
    pub min_hoax_reversal: f64,
    pub max_hoax_reversal: f64,
    /// Weeks between market-movement stories, 0 turns them off
    pub market_movement_interval: u32,
    /// Size in percent of a market movement, always real
    pub min_movement_magnitude: f64,
    pub max_movement_magnitude: f64,
    /// Latest week a market movement lands, counted from publication
    pub max_movement_delay: u32,
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            event_probability: 0.15,
            success_multiplier: 0.7,
            problem_probability: 0.3,
            min_severity: 0.4,
            max_severity: 1.0,
            min_base_magnitude: 5.0,
            max_base_magnitude: 15.0,
            min_disclosure_delay: 1,
            max_disclosure_delay: 3,
            min_impact_delay: 1,
            max_impact_delay: 2,
            real_probability: 0.70,
            min_hoax_reversal: 1.0,
            max_hoax_reversal: 3.0,
            market_movement_interval: 12,
            min_movement_magnitude: 10.0,
            max_movement_magnitude: 20.0,
            max_movement_delay: 3,
        }
    }
}

impl NewsConfig {
    /// No new events or market movements are generated
    pub fn disabled() -> Self {
        Self {
            event_probability: 0.0,
            market_movement_interval: 0,
            ..Default::default()
        }
    }

    /// Busy news cycle for stress runs
    pub fn high_frequency() -> Self {
        Self {
            event_probability: 0.5,
            min_disclosure_delay: 1,
            max_disclosure_delay: 1,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let probabilities = [
            ("event_probability", self.event_probability),
            ("problem_probability", self.problem_probability),
            ("real_probability", self.real_probability),
        ];
        for (name, p) in probabilities {
            if !(0.0..=1.0).contains(&p) {
                return Err(NewsError::InvalidConfig(format!("{name} must be in [0, 1], got {p}")));
            }
        }
        if self.success_multiplier < 0.0 {
            return Err(NewsError::InvalidConfig("success_multiplier must be >= 0".into()));
        }

        let ranges = [
            ("severity", self.min_severity, self.max_severity),
            ("base_magnitude", self.min_base_magnitude, self.max_base_magnitude),
            ("hoax_reversal", self.min_hoax_reversal, self.max_hoax_reversal),
            ("movement_magnitude", self.min_movement_magnitude, self.max_movement_magnitude),
        ];
        for (name, lo, hi) in ranges {
            if lo < 0.0 || lo > hi {
                return Err(NewsError::InvalidConfig(format!("{name} range [{lo}, {hi}] is invalid")));
            }
        }
        if self.min_disclosure_delay == 0 || self.min_disclosure_delay > self.max_disclosure_delay {
            return Err(NewsError::InvalidConfig("disclosure delay range is invalid".into()));
        }
        if self.min_impact_delay == 0 || self.min_impact_delay > self.max_impact_delay {
            return Err(NewsError::InvalidConfig("impact delay range is invalid".into()));
        }
        if self.max_impact_delay > 4 || self.max_movement_delay > 4 {
            return Err(NewsError::InvalidConfig(
                "impact delay cannot exceed the 4-week lookahead".into(),
            ));
        }
        if self.max_movement_delay == 0 {
            return Err(NewsError::InvalidConfig("market movements need a delay of at least 1".into()));
        }
        Ok(())
    }
}
