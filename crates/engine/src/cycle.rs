//! Macro-economic market cycles
//!
//! A cycle may start every 24th week while none is running. While active it
//! replaces each company's random walk with a sector-dependent drift.

use bourse_core::{CycleKind, Week};
use log::info;
use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

pub const CYCLE_INTERVAL_WEEKS: Week = 24;
pub const MIN_CYCLE_WEEKS: u32 = 8;
pub const MAX_CYCLE_WEEKS: u32 = 16;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ActiveMarketCycle {
    pub cycle_type: CycleKind,
    pub weeks_remaining: u32,
    pub headline: String,
    pub description: String,
}

impl ActiveMarketCycle {
    pub fn new(cycle_type: CycleKind, weeks_remaining: u32) -> Self {
        Self {
            cycle_type,
            weeks_remaining,
            headline: cycle_type.headline().to_string(),
            description: cycle_type.description().to_string(),
        }
    }

    /// Whether the cycle is still running `offset` weeks from now
    ///
    /// Offset 1 is next week.
    pub fn covers(&self, offset: u32) -> bool {
        self.weeks_remaining >= offset
    }

    /// One week of drift for a company in `industry`, as a price multiplier
    pub fn drift_factor<R: Rng>(&self, industry: &str, rng: &mut R) -> f64 {
        let (low, high) = self.cycle_type.drift_range(industry);
        1.0 + rng.gen_range(low..=high) / 100.0
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketCycle {
    pub active_cycle: Option<ActiveMarketCycle>,
    /// `(week, headline)` for every cycle that has started
    pub cycle_history: Vec<(Week, String)>,
}

impl MarketCycle {
    pub fn active(&self) -> Option<&ActiveMarketCycle> {
        self.active_cycle.as_ref()
    }

    pub fn kind(&self) -> Option<CycleKind> {
        self.active_cycle.as_ref().map(|c| c.cycle_type)
    }

    pub fn should_trigger(&self, week: Week) -> bool {
        week > 0 && week % CYCLE_INTERVAL_WEEKS == 0 && self.active_cycle.is_none()
    }

    /// Start a random cycle if `week` is a trigger week
    pub fn maybe_trigger<R: Rng>(&mut self, week: Week, rng: &mut R) -> Option<ActiveMarketCycle> {
        if !self.should_trigger(week) {
            return None;
        }
        let kind = *CycleKind::ALL.choose(rng)?;
        let weeks = rng.gen_range(MIN_CYCLE_WEEKS..=MAX_CYCLE_WEEKS);
        Some(self.start(week, kind, weeks).clone())
    }

    /// Force a cycle to begin, replacing any active one
    pub fn start(&mut self, week: Week, kind: CycleKind, weeks: u32) -> &ActiveMarketCycle {
        let cycle = ActiveMarketCycle::new(kind, weeks);
        info!("Market cycle started at week {week}: {kind} for {weeks} week(s)");
        self.cycle_history.push((week, cycle.headline.clone()));
        self.active_cycle.insert(cycle)
    }

    /// Count down the active cycle, returning its kind if it just ended
    pub fn tick(&mut self) -> Option<CycleKind> {
        let cycle = self.active_cycle.as_mut()?;
        cycle.weeks_remaining = cycle.weeks_remaining.saturating_sub(1);
        if cycle.weeks_remaining > 0 {
            return None;
        }
        let kind = cycle.cycle_type;
        self.active_cycle = None;
        info!("Market cycle ended: {kind}");
        Some(kind)
    }
}

/// Display line for a cycle that has just concluded
pub fn cycle_ended_message(kind: CycleKind) -> String {
    format!("MARKET CYCLE ENDED: {kind} has concluded")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_trigger_only_on_interval_weeks() {
        let cycle = MarketCycle::default();
        assert!(!cycle.should_trigger(0));
        assert!(!cycle.should_trigger(23));
        assert!(cycle.should_trigger(24));
        assert!(cycle.should_trigger(48));
    }

    #[test]
    fn test_no_trigger_while_active() {
        let mut cycle = MarketCycle::default();
        let mut rng = StdRng::seed_from_u64(5);
        let started = cycle.maybe_trigger(24, &mut rng).unwrap();
        assert!((MIN_CYCLE_WEEKS..=MAX_CYCLE_WEEKS).contains(&started.weeks_remaining));
        assert!(cycle.maybe_trigger(48, &mut rng).is_none());
        assert_eq!(cycle.cycle_history.len(), 1);
        assert_eq!(cycle.cycle_history[0].0, 24);
    }

    #[test]
    fn test_tick_ends_cycle() {
        let mut cycle = MarketCycle::default();
        cycle.start(24, CycleKind::Recession, 2);
        assert_eq!(cycle.tick(), None);
        assert_eq!(cycle.active().unwrap().weeks_remaining, 1);
        assert_eq!(cycle.tick(), Some(CycleKind::Recession));
        assert!(cycle.active().is_none());
        assert_eq!(cycle.tick(), None);
    }

    #[test]
    fn test_covers_offsets() {
        let cycle = ActiveMarketCycle::new(CycleKind::BullMarket, 2);
        assert!(cycle.covers(1));
        assert!(cycle.covers(2));
        assert!(!cycle.covers(3));
    }

    #[test]
    fn test_drift_within_sector_range() {
        let cycle = ActiveMarketCycle::new(CycleKind::MarketCrash, 10);
        let mut rng = StdRng::seed_from_u64(8);
        for _ in 0..200 {
            let f = cycle.drift_factor("Golem Manufacturing", &mut rng);
            assert!((0.799..=0.881).contains(&f), "{f}");
        }
    }

    #[test]
    fn test_legacy_cycle_json() {
        let json = r#"{
            "active_cycle": {
                "cycle_type": "tech_boom",
                "weeks_remaining": 5,
                "headline": "TECHNOLOGY BOOM",
                "description": "Rally"
            },
            "cycle_history": [[24, "TECHNOLOGY BOOM"]]
        }"#;
        let cycle: MarketCycle = serde_json::from_str(json).unwrap();
        assert_eq!(cycle.kind(), Some(CycleKind::TechBoom));
        assert_eq!(cycle.cycle_history, vec![(24, "TECHNOLOGY BOOM".to_string())]);
    }
}
