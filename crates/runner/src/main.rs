//! bourse-sim - play a Bourse game headlessly
//!
//! ```text
//! bourse-sim --weeks 26 --seed 7 --players Ada --players Grace --save game.json
//! bourse-sim --resume game.json --weeks 4
//! ```
//!
//! Logging goes through `RUST_LOG` (defaults to `info`).

use std::path::PathBuf;
use std::process::ExitCode;

use bourse_engine::EngineConfig;
use bourse_runner::{Session, SessionConfig, load_engine_config};
use bourse_strategy::FundStyle;
use clap::{Parser, ValueEnum};
use log::error;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Style {
    Aggressive,
    Value,
    Contrarian,
}

impl From<Style> for FundStyle {
    fn from(style: Style) -> Self {
        match style {
            Style::Aggressive => FundStyle::Aggressive,
            Style::Value => FundStyle::Value,
            Style::Contrarian => FundStyle::Contrarian,
        }
    }
}

/// Headless Bourse session runner
#[derive(Parser, Debug)]
#[command(name = "bourse-sim")]
#[command(about = "Runs a turn-based Bourse market game with autopilot players")]
#[command(version)]
struct Args {
    /// Weeks to play
    #[arg(long, default_value_t = 12)]
    weeks: u32,

    /// Seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,

    /// Human player names (repeat the flag for more seats)
    #[arg(long = "players", default_value = "Player 1")]
    players: Vec<String>,

    /// Strategy the autopilot plays every seat with
    #[arg(long, value_enum, default_value_t = Style::Value)]
    autopilot: Style,

    /// Write the game to this file when the session ends
    #[arg(long)]
    save: Option<PathBuf>,

    /// Continue a saved game instead of starting a new one
    #[arg(long)]
    resume: Option<PathBuf>,

    /// JSON engine configuration; missing fields take defaults
    #[arg(long)]
    config: Option<PathBuf>,

    /// Leave the NPC hedge funds out of a new game
    #[arg(long)]
    no_funds: bool,
}

fn session_config(args: Args) -> bourse_runner::Result<SessionConfig> {
    let mut engine = match &args.config {
        Some(path) => load_engine_config(path)?,
        None => EngineConfig::default(),
    };
    if args.seed.is_some() {
        engine.seed = args.seed;
    }
    if args.no_funds {
        engine.hedge_funds = false;
    }
    Ok(SessionConfig {
        engine,
        players: args.players,
        weeks: args.weeks,
        autopilot: args.autopilot.into(),
        resume: args.resume,
        save: args.save,
    })
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let outcome = session_config(args)
        .and_then(Session::with_config)
        .and_then(|mut session| session.run());
    match outcome {
        Ok(results) => {
            for line in &results.log {
                println!("{line}");
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
