//! JSON save files
//!
//! A save file is the whole [`GameState`] plus a timestamp. Older files may
//! lack newer fields; loading fills them with defaults and repairs what can
//! be derived.

use std::fs;
use std::path::Path;

use bourse_core::roster_market_cap;
use bourse_news::GazetteKind;
use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::application::Market;
use crate::application::market::seeded_rng;
use crate::config::EngineConfig;
use crate::error::Result;
use crate::state::GameState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveGame {
    #[serde(default = "Utc::now")]
    pub saved_at: DateTime<Utc>,
    #[serde(flatten)]
    pub state: GameState,
}

impl Market {
    pub fn to_json(&self) -> Result<String> {
        let save = SaveGame {
            saved_at: Utc::now(),
            state: self.state.clone(),
        };
        Ok(serde_json::to_string_pretty(&save)?)
    }

    /// Rebuild a game from a save file's contents
    ///
    /// Runtime settings (seed, impact model, news tuning) come from `config`,
    /// not from the file.
    pub fn from_json(json: &str, config: EngineConfig) -> Result<Self> {
        config.validate()?;
        let save: SaveGame = serde_json::from_str(json)?;
        let mut state = save.state;
        let mut rng = seeded_rng(config.seed);

        for company in state.companies.values_mut() {
            let fallback = roster_market_cap(&company.name);
            if company.normalize_shares(fallback) {
                warn!(
                    "{} loaded without a share count, rebuilt {} shares",
                    company.name,
                    company.total_shares()
                );
            }
        }

        state.breaking_news.set_config(config.news.clone());
        state.breaking_news.pending_impacts_mut().fill_missing_reversals(
            config.news.min_hoax_reversal,
            config.news.max_hoax_reversal,
            &mut rng,
        );
        let overdue = state.breaking_news.pending_impacts_mut().reschedule_overdue();
        if overdue > 0 {
            warn!("{overdue} pending impact(s) were already due, landing them next week");
        }
        state.weekly_gazette.set_kind(GazetteKind::Weekly);
        state.market_chronicle.set_kind(GazetteKind::Chronicle);

        state.validate()?;
        if overdue > 0 || !state.future_prices.is_complete(&state.companies) {
            warn!("Save file lookahead stale or incomplete, recomputing");
            state.recompute_forecast(&mut rng);
        }

        info!(
            "Loaded week {} saved at {} ({} player(s), {} pending impact(s))",
            state.week_number,
            save.saved_at.format("%Y-%m-%d %H:%M"),
            state.players.len(),
            state.breaking_news.pending_impacts().len()
        );
        Ok(Self::from_parts(state, config, rng))
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_json()?)?;
        info!("Saved week {} to {}", self.state.week_number, path.display());
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>, config: EngineConfig) -> Result<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json, config)
    }
}
