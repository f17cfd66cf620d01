use serde::{Deserialize, Serialize};

/// Borrowing and margin terms for one account
///
/// Rates are percentages per week. Stored flattened on the player so older
/// saves that only carry some of the fields still load.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CreditTerms {
    /// Debt may not exceed equity × this
    pub max_leverage_ratio: f64,
    /// Charged on the borrowed balance each week (~6% a year)
    pub interest_rate_weekly: f64,
    /// Charged on the value of open shorts each week (~1% a year)
    pub short_borrow_fee_weekly: f64,
    /// Equity required to open a short, as a multiple of its value
    pub short_initial_margin: f64,
    /// Equity required to keep shorts open
    pub short_maintenance_margin: f64,
    /// Margin call when equity / (equity + debt) drops below this
    pub margin_call_threshold: f64,
}

impl Default for CreditTerms {
    fn default() -> Self {
        Self {
            max_leverage_ratio: 5.0,
            interest_rate_weekly: 0.115,
            short_borrow_fee_weekly: 0.02,
            short_initial_margin: 1.5,
            short_maintenance_margin: 1.25,
            margin_call_threshold: 0.30,
        }
    }
}
