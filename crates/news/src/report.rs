use bourse_core::Outlet;
use bourse_ports::Coverage;
use serde::{Deserialize, Serialize};

/// What each outlet ran for one published story
///
/// An empty string means the outlet stayed silent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsReport {
    pub trustworthy_source: String,
    #[serde(alias = "sensationalist_source")]
    pub market_pulse_source: String,
    pub insider_source: String,
    pub rumor_mill_source: String,
    pub insider_flipped: bool,
    /// Only unconfirmed outlets carried the story
    pub is_rumor: bool,
}

impl NewsReport {
    pub fn from_coverage(coverage: &[(Outlet, Coverage)]) -> Self {
        let mut report = NewsReport::default();
        for (outlet, cover) in coverage {
            let text = cover.headline().unwrap_or_default().to_string();
            match outlet {
                Outlet::FinancialTimes => report.trustworthy_source = text,
                Outlet::MarketPulseDaily => report.market_pulse_source = text,
                Outlet::WallStreetWire => {
                    report.insider_flipped = cover.is_inverted();
                    report.insider_source = text;
                }
                Outlet::RumorMill => report.rumor_mill_source = text,
            }
        }
        report.is_rumor = report.trustworthy_source.is_empty();
        report
    }

    pub fn source(&self, outlet: Outlet) -> Option<&str> {
        let text = match outlet {
            Outlet::FinancialTimes => &self.trustworthy_source,
            Outlet::MarketPulseDaily => &self.market_pulse_source,
            Outlet::WallStreetWire => &self.insider_source,
            Outlet::RumorMill => &self.rumor_mill_source,
        };
        (!text.is_empty()).then_some(text.as_str())
    }

    /// Most credible headline that ran, used for the news history
    pub fn lead_headline(&self) -> Option<&str> {
        Outlet::ALL.iter().find_map(|outlet| self.source(*outlet))
    }
}
