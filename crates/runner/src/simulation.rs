//! Simulation - drives a game week by week
//!
//! Each week: open it (charges, breaking news, gazettes), let every
//! autopilot seat take its turn, then advance the market.

use bourse_core::Week;
use bourse_engine::{Market, Standing};
use log::info;

use crate::agent::Autopilot;
use crate::bootstrap::{SessionBootstrap, SessionConfig};
use crate::error::Result;
use crate::event_feed::EventFeed;

/// Summary of a finished session
#[derive(Debug, Clone, Default)]
pub struct SessionResults {
    /// Week the session started in
    pub first_week: Week,
    /// Week the market is in after the last advance
    pub final_week: Week,
    pub weeks_played: u32,
    pub news_published: usize,
    pub impacts_resolved: usize,
    pub margin_calls: usize,
    /// Trades and bond purchases placed by autopilot seats
    pub seat_actions: usize,
    pub fund_trades: usize,
    pub standings: Vec<Standing>,
    /// Display lines for the whole session
    pub log: Vec<String>,
}

pub struct Session {
    config: SessionConfig,
    market: Market,
    seats: Vec<Autopilot>,
}

impl Session {
    pub fn with_config(config: SessionConfig) -> Result<Self> {
        let SessionBootstrap { market, seats } = SessionBootstrap::with_config(&config)?;
        let base_seed = config.engine.seed.unwrap_or_else(rand::random);
        let seats = seats
            .into_iter()
            .enumerate()
            .map(|(i, seat)| Autopilot::new(seat, base_seed.wrapping_add(i as u64 + 1)))
            .collect();
        Ok(Self { config, market, seats })
    }

    pub fn market(&self) -> &Market {
        &self.market
    }

    pub fn into_market(self) -> Market {
        self.market
    }

    /// Play the configured number of weeks, saving at the end if asked
    pub fn run(&mut self) -> Result<SessionResults> {
        let mut results = SessionResults {
            first_week: self.market.week(),
            ..Default::default()
        };

        for _ in 0..self.config.weeks {
            let mut feed = EventFeed::new();

            // A resumed save may already have run this week's news
            if !self.market.state().week_opened {
                let opening = self.market.open_week()?;
                results.news_published += opening.news.published.len();
                feed.opening(&opening);
            }

            for seat in &mut self.seats {
                let turn = seat.take_turn(&mut self.market)?;
                results.seat_actions += turn.executed.len();
                feed.turn(&turn);
            }

            let report = self.market.advance_week()?;
            results.impacts_resolved += report.resolved.len();
            results.margin_calls += report.margin_calls.len();
            results.fund_trades += report.fund_activity.iter().filter(|a| a.fill.is_some()).count();
            feed.report(&report);

            results.weeks_played += 1;
            results.log.extend(feed.into_lines());
        }

        results.final_week = self.market.week();
        results.standings = self.market.standings();
        let mut feed = EventFeed::new();
        feed.standings(&results.standings);
        results.log.extend(feed.into_lines());

        if let Some(path) = &self.config.save {
            self.market.save(path)?;
        }
        info!(
            "Session finished at week {} after {} week(s): {} published, {} resolved",
            results.final_week, results.weeks_played, results.news_published, results.impacts_resolved
        );
        Ok(results)
    }
}
