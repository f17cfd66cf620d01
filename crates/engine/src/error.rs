use bourse_core::Week;
use bourse_news::NewsError;
use bourse_portfolio::TradeRejection;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Unknown company: {0}")]
    UnknownCompany(String),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Trade rejected: {0}")]
    Rejected(#[from] TradeRejection),

    #[error("{0} has already researched a company this week")]
    AlreadyResearched(String),

    #[error("Week {0} has already been opened")]
    WeekAlreadyOpened(Week),

    #[error("Corrupt game state: {0}")]
    CorruptState(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("News error: {0}")]
    News(#[from] NewsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Save file error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, EngineError>;
