//! Persisted game state
//!
//! Everything that goes into a save file lives here. Runtime-only pieces
//! (configuration, impact model, random source) live on [`crate::Market`].

use std::collections::BTreeMap;

use bourse_core::{Company, ThemedAssets, Week, default_roster};
use bourse_news::{BreakingNewsEngine, Gazette};
use bourse_portfolio::{MarketView, Player};
use bourse_strategy::{HedgeFund, default_funds};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::cycle::MarketCycle;
use crate::error::{EngineError, Result};
use crate::forecast::FuturePriceBuffer;

fn first_week() -> Week {
    1
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    #[serde(default = "first_week")]
    pub week_number: Week,
    pub companies: BTreeMap<String, Company>,
    #[serde(default, alias = "market_news")]
    pub breaking_news: BreakingNewsEngine,
    #[serde(default)]
    pub future_prices: FuturePriceBuffer,
    #[serde(default)]
    pub players: Vec<Player>,
    #[serde(default)]
    pub hedge_funds: Vec<HedgeFund>,
    #[serde(default)]
    pub market_cycle: MarketCycle,
    /// Treasury, Quantum Singularity and the themed commodities, stored at
    /// the top level of the save file
    #[serde(flatten)]
    pub themed: ThemedAssets,
    #[serde(default = "Gazette::weekly")]
    pub weekly_gazette: Gazette,
    #[serde(default = "Gazette::chronicle")]
    pub market_chronicle: Gazette,
    /// Breaking news has already run for the current week
    #[serde(default)]
    pub week_opened: bool,
}

impl GameState {
    /// A fresh game at week 1 with the default roster
    pub fn new<R: Rng>(config: &EngineConfig, player_names: &[String], rng: &mut R) -> Self {
        let companies = default_roster(rng);

        let players = player_names
            .iter()
            .map(|name| {
                let mut player = Player::with_cash(name.clone(), config.starting_cash);
                player.credit = config.credit;
                player
            })
            .collect();

        let hedge_funds = if config.hedge_funds {
            default_funds()
                .into_iter()
                .map(|mut fund| {
                    fund.account.credit = config.credit;
                    fund
                })
                .collect()
        } else {
            Vec::new()
        };

        let mut state = Self {
            week_number: first_week(),
            companies,
            breaking_news: BreakingNewsEngine::new(config.news.clone()),
            future_prices: FuturePriceBuffer::new(),
            players,
            hedge_funds,
            market_cycle: MarketCycle::default(),
            themed: ThemedAssets::default(),
            weekly_gazette: Gazette::weekly(),
            market_chronicle: Gazette::chronicle(),
            week_opened: false,
        };
        state.recompute_forecast(rng);
        state
    }

    pub fn view(&self) -> MarketView<'_> {
        MarketView::new(&self.companies, &self.themed)
    }

    pub fn company(&self, name: &str) -> Result<&Company> {
        self.companies
            .get(name)
            .ok_or_else(|| EngineError::UnknownCompany(name.to_string()))
    }

    pub fn player(&self, name: &str) -> Result<&Player> {
        self.players
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
    }

    pub fn player_mut(&mut self, name: &str) -> Result<&mut Player> {
        self.players
            .iter_mut()
            .find(|p| p.name == name)
            .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
    }

    pub fn human_names(&self) -> Vec<String> {
        self.players.iter().map(|p| p.name.clone()).collect()
    }

    /// Rebuild the whole lookahead from the live prices and pending impacts
    pub fn recompute_forecast<R: Rng>(&mut self, rng: &mut R) {
        self.future_prices.recompute(
            &self.companies,
            self.breaking_news.pending_impacts(),
            self.market_cycle.active(),
            rng,
        );
    }

    /// Check the cross-references a week advance relies on
    pub fn validate(&self) -> Result<()> {
        if self.companies.is_empty() {
            return Err(EngineError::CorruptState("no companies".into()));
        }
        if let Some(name) = self
            .breaking_news
            .pending_impacts()
            .companies()
            .into_iter()
            .find(|name| !self.companies.contains_key(*name))
        {
            return Err(EngineError::CorruptState(format!(
                "pending impact references unknown company {name}"
            )));
        }
        if let Some(name) = self
            .breaking_news
            .company_events()
            .keys()
            .find(|name| !self.companies.contains_key(name.as_str()))
        {
            return Err(EngineError::CorruptState(format!(
                "queued event references unknown company {name}"
            )));
        }
        if let Some(company) = self.companies.values().find(|c| !(c.price() > 0.0)) {
            return Err(EngineError::CorruptState(format!(
                "{} has a non-positive price",
                company.name
            )));
        }
        Ok(())
    }
}
