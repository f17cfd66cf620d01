use std::path::PathBuf;

use bourse_engine::EngineError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RunnerError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Cannot read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Invalid session: {0}")]
    InvalidSession(String),
}

pub type Result<T> = std::result::Result<T, RunnerError>;
