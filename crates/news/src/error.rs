use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum NewsError {
    #[error("Invalid news configuration: {0}")]
    InvalidConfig(String),

    #[error("Unknown company: {0}")]
    UnknownCompany(String),
}

pub type Result<T> = std::result::Result<T, NewsError>;
