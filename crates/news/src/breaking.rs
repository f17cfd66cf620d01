//! Breaking-news engine
//!
//! Owns the private company events, the outlets and the pending-impact
//! ledger. Each week it publishes events whose disclosure delay ran out,
//! applies their instant stage and schedules the delayed stage, then rolls
//! new private events and lets the Wall Street Wire leak some of them.
//!
//! Every quarter a market movement story runs as well. It has no private
//! event behind it, is never a hoax and moves the price 10-20% in the
//! direction the lookahead already points.

use std::collections::BTreeMap;
use std::sync::Arc;

use bourse_core::{Company, Outlet, Price, Sentiment, Week};
use bourse_ports::{Coverage, ReportingPolicy, Story};
use log::{debug, info};
use rand::Rng;
use rand::seq::IteratorRandom;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::NewsConfig;
use crate::error::{NewsError, Result};
use crate::event::CompanyEvent;
use crate::impact::PendingNewsImpact;
use crate::ledger::ImpactLedger;
use crate::outlets::default_outlets;
use crate::report::NewsReport;

/// A story that went public this week
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedNews {
    pub impact_id: Uuid,
    pub company: String,
    pub report: NewsReport,
    pub sentiment: Sentiment,
    pub magnitude: f64,
    pub weeks_until_impact: u32,
    /// Live price after the instant stage
    pub instant_price: Price,
    /// Quarterly market movement rather than a company event
    pub market_movement: bool,
}

/// An early leak of a still-private event
#[derive(Debug, Clone, PartialEq)]
pub struct InsiderTip {
    pub company: String,
    pub headline: String,
    pub sentiment: Sentiment,
    pub weeks_until_public: u32,
}

/// Everything the news engine produced in one week
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BreakingNewsDigest {
    pub published: Vec<PublishedNews>,
    pub insider_tips: Vec<InsiderTip>,
}

impl BreakingNewsDigest {
    pub fn is_empty(&self) -> bool {
        self.published.is_empty() && self.insider_tips.is_empty()
    }
}

/// Sentiment threshold in percent for a market movement's direction
const MOVEMENT_TREND_THRESHOLD: f64 = 2.0;

/// What a story says and how it will land
struct Release {
    sentiment: Sentiment,
    magnitude: f64,
    weeks_until_impact: u32,
    is_real: bool,
    market_movement: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakingNewsEngine {
    #[serde(skip)]
    config: NewsConfig,
    #[serde(skip, default = "default_outlets")]
    outlets: Vec<Arc<dyn ReportingPolicy>>,
    #[serde(default)]
    company_events: BTreeMap<String, Vec<CompanyEvent>>,
    #[serde(default)]
    pending_impacts: ImpactLedger,
    #[serde(default)]
    news_history: Vec<(Week, String)>,
}

impl Default for BreakingNewsEngine {
    fn default() -> Self {
        Self::new(NewsConfig::default())
    }
}

impl BreakingNewsEngine {
    pub fn new(config: NewsConfig) -> Self {
        Self {
            config,
            outlets: default_outlets(),
            company_events: BTreeMap::new(),
            pending_impacts: ImpactLedger::new(),
            news_history: Vec::new(),
        }
    }

    /// Replace the outlets, e.g. with custom policies in tests
    pub fn with_outlets(mut self, outlets: Vec<Arc<dyn ReportingPolicy>>) -> Self {
        self.outlets = outlets;
        self
    }

    pub fn config(&self) -> &NewsConfig {
        &self.config
    }

    /// Restore the config after loading, since it is not persisted
    pub fn set_config(&mut self, config: NewsConfig) {
        self.config = config;
    }

    pub fn pending_impacts(&self) -> &ImpactLedger {
        &self.pending_impacts
    }

    pub fn pending_impacts_mut(&mut self) -> &mut ImpactLedger {
        &mut self.pending_impacts
    }

    pub fn company_events(&self) -> &BTreeMap<String, Vec<CompanyEvent>> {
        &self.company_events
    }

    pub fn news_history(&self) -> &[(Week, String)] {
        &self.news_history
    }

    /// Queue a private event for `company`
    pub fn add_event(&mut self, company: impl Into<String>, event: CompanyEvent) {
        self.company_events.entry(company.into()).or_default().push(event);
    }

    /// Run one week of breaking news against the live prices
    ///
    /// Published stories move `companies` by their instant share. The caller
    /// must rebuild any precomputed prices afterwards.
    pub fn run_week<R: Rng>(
        &mut self,
        week: Week,
        companies: &mut BTreeMap<String, Company>,
        rng: &mut R,
    ) -> Result<BreakingNewsDigest> {
        let mut digest = BreakingNewsDigest::default();

        for (name, event) in self.take_due_events() {
            let published = self.publish(week, &name, &event, companies, rng)?;
            digest.published.push(published);
        }

        for company in companies.values() {
            let Some(event) = CompanyEvent::roll(company, week, &self.config, rng) else {
                continue;
            };
            debug!(
                "{:?} event at {} (severity {:.2}), public in {} week(s)",
                event.event_type, company.name, event.severity, event.weeks_until_public
            );
            if let Some(tip) = self.leak(company, &event, rng) {
                digest.insider_tips.push(tip);
            }
            self.add_event(company.name.clone(), event);
        }

        Ok(digest)
    }

    /// Publish a story right away, bypassing the disclosure delay
    pub fn publish_now<R: Rng>(
        &mut self,
        week: Week,
        company: &str,
        event: &CompanyEvent,
        companies: &mut BTreeMap<String, Company>,
        rng: &mut R,
    ) -> Result<PublishedNews> {
        self.publish(week, company, event, companies, rng)
    }

    fn take_due_events(&mut self) -> Vec<(String, CompanyEvent)> {
        let mut due = Vec::new();
        for (name, events) in self.company_events.iter_mut() {
            for event in events.iter_mut() {
                event.weeks_until_public = event.weeks_until_public.saturating_sub(1);
            }
            let (ready, waiting): (Vec<_>, Vec<_>) = std::mem::take(events)
                .into_iter()
                .partition(|e| e.weeks_until_public == 0);
            *events = waiting;
            due.extend(ready.into_iter().map(|e| (name.clone(), e)));
        }
        self.company_events.retain(|_, events| !events.is_empty());
        due
    }

    /// Run the quarterly market movement if one is due this week
    ///
    /// `outlook` gives a company's average lookahead price; the story's
    /// sentiment follows it when it is more than 2% away from the live
    /// price, otherwise it is a coin flip.
    pub fn publish_market_movement<R: Rng>(
        &mut self,
        week: Week,
        companies: &mut BTreeMap<String, Company>,
        outlook: impl Fn(&str) -> Option<Price>,
        rng: &mut R,
    ) -> Result<Option<PublishedNews>> {
        let interval = self.config.market_movement_interval;
        if interval == 0 || week == 0 || week % interval != 0 {
            return Ok(None);
        }
        let Some(company) = companies.values().choose(rng) else {
            return Ok(None);
        };
        let name = company.name.clone();
        let trend = outlook(&name)
            .map(|future| (future - company.price()) / company.price() * 100.0)
            .unwrap_or(0.0);
        let sentiment = if trend > MOVEMENT_TREND_THRESHOLD {
            Sentiment::Positive
        } else if trend < -MOVEMENT_TREND_THRESHOLD {
            Sentiment::Negative
        } else if rng.gen_bool(0.5) {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };

        let config = &self.config;
        let release = Release {
            sentiment,
            magnitude: sentiment.sign()
                * rng.gen_range(config.min_movement_magnitude..=config.max_movement_magnitude),
            weeks_until_impact: rng.gen_range(1..=config.max_movement_delay),
            is_real: true,
            market_movement: true,
        };
        self.release(week, &name, release, companies, rng).map(Some)
    }

    fn publish<R: Rng>(
        &mut self,
        week: Week,
        name: &str,
        event: &CompanyEvent,
        companies: &mut BTreeMap<String, Company>,
        rng: &mut R,
    ) -> Result<PublishedNews> {
        let config = &self.config;
        let sentiment = event.sentiment();
        let release = Release {
            sentiment,
            magnitude: sentiment.sign()
                * event.severity
                * rng.gen_range(config.min_base_magnitude..=config.max_base_magnitude),
            weeks_until_impact: rng.gen_range(config.min_impact_delay..=config.max_impact_delay),
            is_real: rng.gen_bool(config.real_probability),
            market_movement: false,
        };
        self.release(week, name, release, companies, rng)
    }

    fn release<R: Rng>(
        &mut self,
        week: Week,
        name: &str,
        release: Release,
        companies: &mut BTreeMap<String, Company>,
        rng: &mut R,
    ) -> Result<PublishedNews> {
        let company = companies
            .get_mut(name)
            .ok_or_else(|| NewsError::UnknownCompany(name.to_string()))?;

        let Release {
            sentiment,
            magnitude,
            weeks_until_impact,
            is_real,
            market_movement,
        } = release;
        let id = Uuid::from_u128(rng.r#gen());
        let mut impact = PendingNewsImpact::new(name, sentiment, magnitude, weeks_until_impact);
        impact.id = id;
        if !is_real {
            let config = &self.config;
            impact = impact.hoax(rng.gen_range(config.min_hoax_reversal..=config.max_hoax_reversal));
        }

        let story = Story {
            company: name,
            industry: &company.industry,
            sentiment,
            is_real,
        };
        let coverage: Vec<(Outlet, Coverage)> = self
            .outlets
            .iter()
            .map(|policy| (policy.outlet(), policy.cover(&story, rng)))
            .collect();
        let report = NewsReport::from_coverage(&coverage);
        let news_text = report
            .lead_headline()
            .map(str::to_string)
            .unwrap_or_else(|| format!("Unconfirmed chatter surrounds {name}."));

        let instant_price = impact.apply_instant(company).unwrap_or(company.price());
        info!(
            "Week {week}: published {} {} on {name} ({magnitude:+.2}%, {}), lands in {weeks_until_impact} week(s)",
            sentiment_label(sentiment),
            if market_movement { "market movement" } else { "news" },
            if is_real { "real" } else { "hoax" },
        );

        let impact = impact.with_report(news_text.clone(), report.clone());
        self.news_history.push((week, news_text));
        self.pending_impacts.push(impact);

        Ok(PublishedNews {
            impact_id: id,
            company: name.to_string(),
            report,
            sentiment,
            magnitude,
            weeks_until_impact,
            instant_price,
            market_movement,
        })
    }

    fn leak<R: Rng>(&self, company: &Company, event: &CompanyEvent, rng: &mut R) -> Option<InsiderTip> {
        let insider = self
            .outlets
            .iter()
            .find(|policy| policy.outlet() == Outlet::WallStreetWire)?;
        let story = Story {
            company: &company.name,
            industry: &company.industry,
            sentiment: event.sentiment(),
            is_real: true,
        };
        match insider.cover(&story, rng) {
            Coverage::Silent => None,
            Coverage::Report {
                headline,
                sentiment,
                ..
            } => Some(InsiderTip {
                company: company.name.clone(),
                headline,
                sentiment,
                weeks_until_public: event.weeks_until_public,
            }),
        }
    }
}

fn sentiment_label(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "positive",
        Sentiment::Negative => "negative",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventType;
    use approx::assert_relative_eq;
    use bourse_core::default_roster;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn event(event_type: EventType, weeks_until_public: u32) -> CompanyEvent {
        CompanyEvent {
            event_type,
            severity: 0.5,
            discovery_week: 1,
            weeks_until_public,
            industry: "Technology".into(),
        }
    }

    #[test]
    fn test_event_publishes_after_delay() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut companies = default_roster(&mut rng);
        let mut engine = BreakingNewsEngine::new(NewsConfig::disabled());
        engine.add_event("TechCorp", event(EventType::Success, 2));

        let digest = engine.run_week(2, &mut companies, &mut rng).unwrap();
        assert!(digest.published.is_empty());
        assert!(engine.pending_impacts().is_empty());

        let before = companies["TechCorp"].price();
        let digest = engine.run_week(3, &mut companies, &mut rng).unwrap();
        assert_eq!(digest.published.len(), 1);
        let news = &digest.published[0];
        assert_eq!(news.company, "TechCorp");
        assert_eq!(news.sentiment, Sentiment::Positive);
        assert!(news.magnitude >= 2.5 && news.magnitude <= 7.5);
        assert!((1..=2).contains(&news.weeks_until_impact));

        let after = companies["TechCorp"].price();
        assert_relative_eq!(after, before * (1.0 + news.magnitude * 0.2 / 100.0), epsilon = 1e-9);
        assert_relative_eq!(news.instant_price, after);

        let impact = engine.pending_impacts().get(news.impact_id).unwrap();
        assert!(impact.instant_impact_applied);
        assert!(!impact.news_text.is_empty());
        assert_eq!(engine.news_history().len(), 1);
        assert!(engine.company_events().is_empty());
    }

    #[test]
    fn test_negative_events_publish_negative() {
        let mut rng = StdRng::seed_from_u64(12);
        let mut companies = default_roster(&mut rng);
        let mut engine = BreakingNewsEngine::new(NewsConfig::disabled());
        engine.add_event("PharmaCare", event(EventType::Scandal, 1));
        let digest = engine.run_week(1, &mut companies, &mut rng).unwrap();
        assert_eq!(digest.published[0].sentiment, Sentiment::Negative);
        assert!(digest.published[0].magnitude < 0.0);
    }

    #[test]
    fn test_unknown_company_fails() {
        let mut rng = StdRng::seed_from_u64(13);
        let mut companies = default_roster(&mut rng);
        let mut engine = BreakingNewsEngine::new(NewsConfig::disabled());
        engine.add_event("Ghost Corp", event(EventType::Problem, 1));
        let err = engine.run_week(1, &mut companies, &mut rng).unwrap_err();
        assert_eq!(err, NewsError::UnknownCompany("Ghost Corp".into()));
    }

    #[test]
    fn test_busy_week_generates_events_and_tips() {
        let mut rng = StdRng::seed_from_u64(14);
        let mut companies = default_roster(&mut rng);
        let config = NewsConfig {
            event_probability: 1.0,
            ..Default::default()
        };
        let mut engine = BreakingNewsEngine::new(config);
        let mut tips = 0;
        for week in 1..=10 {
            tips += engine.run_week(week, &mut companies, &mut rng).unwrap().insider_tips.len();
        }
        // 70 events at a 35% leak rate
        assert!(tips > 10, "only {tips} tips");
        assert!(!engine.pending_impacts().is_empty());
    }

    #[test]
    fn test_market_movement_follows_the_lookahead() {
        let mut rng = StdRng::seed_from_u64(15);
        let mut companies = default_roster(&mut rng);
        let mut engine = BreakingNewsEngine::new(NewsConfig::default());

        let none = engine
            .publish_market_movement(11, &mut companies, |_| None, &mut rng)
            .unwrap();
        assert!(none.is_none());

        // Every lookahead sits 10% above the live price
        let prices: BTreeMap<String, Price> =
            companies.iter().map(|(name, c)| (name.clone(), c.price())).collect();
        let news = engine
            .publish_market_movement(12, &mut companies, |name| prices.get(name).map(|p| p * 1.1), &mut rng)
            .unwrap()
            .unwrap();
        assert!(news.market_movement);
        assert_eq!(news.sentiment, Sentiment::Positive);
        assert!((10.0..=20.0).contains(&news.magnitude));
        assert!((1..=3).contains(&news.weeks_until_impact));

        let before = prices[&news.company];
        assert_relative_eq!(
            companies[&news.company].price(),
            before * (1.0 + news.magnitude * 0.2 / 100.0),
            epsilon = 1e-9
        );
        let impact = engine.pending_impacts().get(news.impact_id).unwrap();
        assert!(impact.is_real);
        assert!(impact.instant_impact_applied);
    }

    #[test]
    fn test_market_movements_are_never_hoaxes() {
        let mut rng = StdRng::seed_from_u64(16);
        let mut companies = default_roster(&mut rng);
        let config = NewsConfig {
            market_movement_interval: 1,
            real_probability: 0.0,
            ..Default::default()
        };
        let mut engine = BreakingNewsEngine::new(config);
        for week in 1..=20 {
            let news = engine
                .publish_market_movement(week, &mut companies, |_| None, &mut rng)
                .unwrap()
                .unwrap();
            assert!(news.magnitude.abs() >= 10.0);
        }
        assert_eq!(engine.pending_impacts().len(), 20);
        assert!(engine.pending_impacts().iter().all(|i| i.is_real));

        let mut quiet = BreakingNewsEngine::new(NewsConfig::disabled());
        assert!(
            quiet
                .publish_market_movement(12, &mut companies, |_| None, &mut rng)
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_config_and_outlets_not_persisted() {
        let mut engine = BreakingNewsEngine::new(NewsConfig::high_frequency());
        engine.add_event("TechCorp", event(EventType::Success, 2));
        let json = serde_json::to_string(&engine).unwrap();
        assert!(json.contains("pending_impacts"));
        assert!(!json.contains("event_probability"));

        let back: BreakingNewsEngine = serde_json::from_str(&json).unwrap();
        assert_eq!(back.config(), &NewsConfig::default());
        assert_eq!(back.outlets.len(), 4);
        assert_eq!(back.company_events()["TechCorp"].len(), 1);
    }
}
