//! News outlets
//!
//! Every outlet is the same policy type with different probabilities:
//!
//! | Outlet | report | accuracy | inversion | slant |
//! |---|---|---|---|---|
//! | Financial Times | 0.90 | 1.00 | 0.00 | - |
//! | Market Pulse Daily | 1.00 | 0.20 | 0.00 | - |
//! | Wall Street Wire | 0.35 | 0.90 | 0.10 | - |
//! | The Rumor Mill | 0.50 | 0.25 | 0.00 | negative |
//!
//! An accurate outlet never runs a hoax. All three draws are made for every
//! story so the random stream does not depend on earlier decisions.

use std::sync::Arc;

use bourse_core::{Outlet, Sentiment};
use bourse_ports::{Coverage, ReportingPolicy, Story};
use log::debug;
use rand::{Rng, RngCore};

use crate::templates;

/// Headline register of an outlet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutletStyle {
    Sober,
    Sensational,
    Insider,
    Rumor,
}

impl OutletStyle {
    fn templates(&self, sentiment: Sentiment) -> &'static [&'static str] {
        match (self, sentiment) {
            (OutletStyle::Sober, Sentiment::Positive) => templates::POSITIVE,
            (OutletStyle::Sober, Sentiment::Negative) => templates::NEGATIVE,
            (OutletStyle::Sensational, Sentiment::Positive) => templates::SENSATIONAL_POSITIVE,
            (OutletStyle::Sensational, Sentiment::Negative) => templates::SENSATIONAL_NEGATIVE,
            (OutletStyle::Insider, Sentiment::Positive) => templates::INSIDER_POSITIVE,
            (OutletStyle::Insider, Sentiment::Negative) => templates::INSIDER_NEGATIVE,
            (OutletStyle::Rumor, Sentiment::Positive) => templates::RUMOR_POSITIVE,
            (OutletStyle::Rumor, Sentiment::Negative) => templates::RUMOR_NEGATIVE,
        }
    }
}

/// Probabilistic editorial policy for one outlet
#[derive(Debug, Clone, PartialEq)]
pub struct OutletPolicy {
    pub outlet: Outlet,
    /// Chance the outlet covers a story at all
    pub report_prob: f64,
    /// Chance the outlet checks its facts and drops a hoax
    pub accuracy_prob: f64,
    /// Chance the outlet reports the opposite direction
    pub inversion_prob: f64,
    /// Forced direction regardless of the story
    pub slant: Option<Sentiment>,
    pub style: OutletStyle,
}

impl OutletPolicy {
    pub fn financial_times() -> Self {
        Self {
            outlet: Outlet::FinancialTimes,
            report_prob: 0.9,
            accuracy_prob: 1.0,
            inversion_prob: 0.0,
            slant: None,
            style: OutletStyle::Sober,
        }
    }

    pub fn market_pulse_daily() -> Self {
        Self {
            outlet: Outlet::MarketPulseDaily,
            report_prob: 1.0,
            accuracy_prob: 0.2,
            inversion_prob: 0.0,
            slant: None,
            style: OutletStyle::Sensational,
        }
    }

    pub fn wall_street_wire() -> Self {
        Self {
            outlet: Outlet::WallStreetWire,
            report_prob: 0.35,
            accuracy_prob: 0.9,
            inversion_prob: 0.1,
            slant: None,
            style: OutletStyle::Insider,
        }
    }

    pub fn rumor_mill() -> Self {
        Self {
            outlet: Outlet::RumorMill,
            report_prob: 0.5,
            accuracy_prob: 0.25,
            inversion_prob: 0.0,
            slant: Some(Sentiment::Negative),
            style: OutletStyle::Rumor,
        }
    }
}

impl ReportingPolicy for OutletPolicy {
    fn outlet(&self) -> Outlet {
        self.outlet
    }

    fn cover(&self, story: &Story<'_>, rng: &mut dyn RngCore) -> Coverage {
        let reports = rng.gen_bool(self.report_prob.clamp(0.0, 1.0));
        let accurate = rng.gen_bool(self.accuracy_prob.clamp(0.0, 1.0));
        let inverts = rng.gen_bool(self.inversion_prob.clamp(0.0, 1.0));

        if !reports || (!story.is_real && accurate) {
            debug!("{} stays silent on {}", self.outlet, story.company);
            return Coverage::Silent;
        }

        let mut sentiment = self.slant.unwrap_or(story.sentiment);
        if inverts {
            sentiment = sentiment.opposite();
        }
        let headline = templates::render(
            self.style.templates(sentiment),
            story.company,
            story.industry,
            rng,
        );
        let inverted = sentiment != story.sentiment;
        debug!(
            "{} covers {} as {:?}{}",
            self.outlet,
            story.company,
            sentiment,
            if inverted { " (inverted)" } else { "" }
        );

        Coverage::Report {
            headline,
            sentiment,
            inverted,
        }
    }
}

/// The four outlets in reporting order
pub fn default_outlets() -> Vec<Arc<dyn ReportingPolicy>> {
    vec![
        Arc::new(OutletPolicy::financial_times()),
        Arc::new(OutletPolicy::market_pulse_daily()),
        Arc::new(OutletPolicy::wall_street_wire()),
        Arc::new(OutletPolicy::rumor_mill()),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn story(is_real: bool, sentiment: Sentiment) -> Story<'static> {
        Story {
            company: "TechCorp",
            industry: "Technology",
            sentiment,
            is_real,
        }
    }

    #[test]
    fn test_financial_times_never_runs_hoaxes() {
        let ft = OutletPolicy::financial_times();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..500 {
            assert_eq!(ft.cover(&story(false, Sentiment::Positive), &mut rng), Coverage::Silent);
        }
    }

    #[test]
    fn test_financial_times_is_accurate_when_reporting() {
        let ft = OutletPolicy::financial_times();
        let mut rng = StdRng::seed_from_u64(2);
        let mut reported = 0;
        for _ in 0..500 {
            if let Coverage::Report {
                sentiment,
                inverted,
                ..
            } = ft.cover(&story(true, Sentiment::Negative), &mut rng)
            {
                reported += 1;
                assert_eq!(sentiment, Sentiment::Negative);
                assert!(!inverted);
            }
        }
        assert!(reported > 400);
    }

    #[test]
    fn test_market_pulse_runs_most_hoaxes() {
        let pulse = OutletPolicy::market_pulse_daily();
        let mut rng = StdRng::seed_from_u64(3);
        let runs = (0..1000)
            .filter(|_| pulse.cover(&story(false, Sentiment::Positive), &mut rng) != Coverage::Silent)
            .count();
        assert!((700..900).contains(&runs), "ran {runs}");
    }

    #[test]
    fn test_rumor_mill_is_always_negative() {
        let rumor = OutletPolicy::rumor_mill();
        let mut rng = StdRng::seed_from_u64(4);
        for _ in 0..300 {
            if let Coverage::Report { sentiment, .. } =
                rumor.cover(&story(true, Sentiment::Positive), &mut rng)
            {
                assert_eq!(sentiment, Sentiment::Negative);
            }
        }
    }

    #[test]
    fn test_wire_sometimes_inverts() {
        let wire = OutletPolicy::wall_street_wire();
        let mut rng = StdRng::seed_from_u64(5);
        let inverted = (0..3000)
            .filter(|_| wire.cover(&story(true, Sentiment::Positive), &mut rng).is_inverted())
            .count();
        assert!(inverted > 40 && inverted < 220, "inverted {inverted}");
    }

    #[test]
    fn test_seeded_coverage_reproduces() {
        let outlets = default_outlets();
        let run = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            outlets
                .iter()
                .map(|o| o.cover(&story(true, Sentiment::Positive), &mut rng))
                .collect::<Vec<_>>()
        };
        assert_eq!(run(99), run(99));
    }
}
