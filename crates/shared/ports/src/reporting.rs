use bourse_core::{Outlet, Sentiment};
use rand::RngCore;

/// A published company event as the outlets see it
#[derive(Debug, Clone, Copy)]
pub struct Story<'a> {
    pub company: &'a str,
    pub industry: &'a str,
    pub sentiment: Sentiment,
    pub is_real: bool,
}

/// What one outlet decided to run for a story
#[derive(Debug, Clone, PartialEq)]
pub enum Coverage {
    Silent,
    Report {
        headline: String,
        sentiment: Sentiment,
        /// The outlet reported the opposite of the true direction
        inverted: bool,
    },
}

impl Coverage {
    pub fn headline(&self) -> Option<&str> {
        match self {
            Coverage::Silent => None,
            Coverage::Report { headline, .. } => Some(headline),
        }
    }

    pub fn is_inverted(&self) -> bool {
        matches!(self, Coverage::Report { inverted: true, .. })
    }
}

/// Port for a news outlet's editorial behaviour
///
/// Every call draws its random decisions from `rng`, so a seeded generator
/// reproduces the same coverage.
pub trait ReportingPolicy: Send + Sync + std::fmt::Debug {
    fn outlet(&self) -> Outlet;

    /// Decide whether and how to cover a story
    fn cover(&self, story: &Story<'_>, rng: &mut dyn RngCore) -> Coverage;
}
