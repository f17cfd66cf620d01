//! Bourse Impact
//!
//! Trade cost models and the solver that turns a dollar amount into a
//! share count when price and size depend on each other.

mod penalty;
mod solver;
mod square_root;
mod zero;

pub use penalty::SlippagePenalty;
pub use solver::{Quote, SolverConfig, quote_shares, solve_buy, solve_sell};
pub use square_root::{SquareRootModel, SquareRootParams};
pub use zero::ZeroImpact;
