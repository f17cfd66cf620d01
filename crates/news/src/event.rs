use bourse_core::{Company, Sentiment, Week};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::NewsConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    Success,
    Problem,
    Scandal,
}

impl EventType {
    pub fn sentiment(&self) -> Sentiment {
        match self {
            EventType::Success => Sentiment::Positive,
            EventType::Problem | EventType::Scandal => Sentiment::Negative,
        }
    }
}

/// Something that happened at a company but is not public yet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompanyEvent {
    pub event_type: EventType,
    /// 0..1, scales the eventual price move
    pub severity: f64,
    pub discovery_week: Week,
    pub weeks_until_public: u32,
    pub industry: String,
}

impl CompanyEvent {
    /// Roll whether `company` has an event this week
    ///
    /// P(success) grows with the company's hidden strength, problems have a
    /// fixed chance and scandals take whatever probability is left.
    pub fn roll<R: Rng + ?Sized>(
        company: &Company,
        week: Week,
        config: &NewsConfig,
        rng: &mut R,
    ) -> Option<Self> {
        if !rng.gen_bool(config.event_probability) {
            return None;
        }

        let p_success = (company.true_strength * config.success_multiplier).clamp(0.0, 1.0);
        let roll: f64 = rng.r#gen();
        let event_type = if roll < p_success {
            EventType::Success
        } else if roll < p_success + config.problem_probability {
            EventType::Problem
        } else {
            EventType::Scandal
        };

        Some(Self {
            event_type,
            severity: rng.gen_range(config.min_severity..=config.max_severity),
            discovery_week: week,
            weeks_until_public: rng
                .gen_range(config.min_disclosure_delay..=config.max_disclosure_delay),
            industry: company.industry.clone(),
        })
    }

    pub fn sentiment(&self) -> Sentiment {
        self.event_type.sentiment()
    }
}
