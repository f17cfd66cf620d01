use serde::{Deserialize, Serialize};

/// Direction a news story claims a stock will move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Negative,
}

impl Sentiment {
    /// Returns the opposite sentiment
    pub fn opposite(&self) -> Self {
        match self {
            Sentiment::Positive => Sentiment::Negative,
            Sentiment::Negative => Sentiment::Positive,
        }
    }

    /// +1.0 for positive, -1.0 for negative
    pub fn sign(&self) -> f64 {
        match self {
            Sentiment::Positive => 1.0,
            Sentiment::Negative => -1.0,
        }
    }
}
