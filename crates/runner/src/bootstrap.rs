//! Bootstrap - session setup
//!
//! Builds the [`Market`] a session runs on, either a new game from the
//! engine configuration or a resumed one from a save file, and assigns an
//! autopilot style to every human seat.

use std::fs;
use std::path::{Path, PathBuf};

use bourse_engine::{EngineConfig, Market};
use bourse_strategy::FundStyle;
use log::info;

use crate::error::{Result, RunnerError};

/// Session configuration
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Engine settings for a new or resumed game
    pub engine: EngineConfig,
    /// Human seats for a new game; ignored when resuming
    pub players: Vec<String>,
    /// Weeks to play
    pub weeks: u32,
    /// Decision rule used for every human seat
    pub autopilot: FundStyle,
    /// Resume from this save instead of starting fresh
    pub resume: Option<PathBuf>,
    /// Write the game here when the session ends
    pub save: Option<PathBuf>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            engine: EngineConfig::default(),
            players: vec!["Player 1".to_string()],
            weeks: 12,
            autopilot: FundStyle::Value,
            resume: None,
            save: None,
        }
    }
}

/// Read an engine configuration file
///
/// Missing fields take their defaults, so a file only needs the settings it
/// changes.
pub fn load_engine_config(path: &Path) -> Result<EngineConfig> {
    let text = fs::read_to_string(path).map_err(|source| RunnerError::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| RunnerError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}

/// An autopilot seat: a human account and the style that plays it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Seat {
    pub player: String,
    pub style: FundStyle,
}

/// A market ready to play plus its seats
pub struct SessionBootstrap {
    pub market: Market,
    pub seats: Vec<Seat>,
}

impl SessionBootstrap {
    pub fn with_config(config: &SessionConfig) -> Result<Self> {
        let market = match &config.resume {
            Some(path) => {
                info!("Resuming game from {}", path.display());
                Market::load(path, config.engine.clone())?
            }
            None => {
                if config.players.is_empty() {
                    return Err(RunnerError::InvalidSession("at least one player is required".into()));
                }
                Market::new(config.engine.clone(), &config.players)?
            }
        };

        let seats = market
            .state()
            .human_names()
            .into_iter()
            .map(|player| Seat {
                player,
                style: config.autopilot,
            })
            .collect();

        Ok(Self { market, seats })
    }
}
