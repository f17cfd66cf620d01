//! Weekly cosmetic news feeds
//!
//! The Business Gazette and the Market Chronicle print one routine item per
//! company each week. Some items are hoaxes; the share of real items cycles
//! over twelve weeks. Nothing here moves a price.

use std::collections::BTreeMap;

use bourse_core::{Company, Week};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::templates;

/// Share of real items for `week`
///
/// | `(week-1) % 12` | real |
/// |---|---|
/// | 0-2 | 80% |
/// | 3-5 | 70% |
/// | 6-8 | 50% |
/// | 9-11 | 60% |
pub fn trust_ratio(week: Week) -> f64 {
    match week.saturating_sub(1) % 12 {
        0..=2 => 0.8,
        3..=5 => 0.7,
        6..=8 => 0.5,
        _ => 0.6,
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GazetteKind {
    #[default]
    Weekly,
    Chronicle,
}

impl GazetteKind {
    pub fn title(&self) -> &'static str {
        match self {
            GazetteKind::Weekly => "The Business Gazette",
            GazetteKind::Chronicle => "The Market Chronicle",
        }
    }

    fn templates(&self) -> &'static [&'static str] {
        match self {
            GazetteKind::Weekly => templates::GAZETTE,
            GazetteKind::Chronicle => templates::CHRONICLE,
        }
    }
}

/// One printed item, stored as `[week, text, is_real]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawItem", into = "(Week, String, bool)")]
pub struct GazetteItem {
    pub week: Week,
    pub text: String,
    pub is_real: bool,
}

/// Older saves stored `[week, text]` only; those items count as real
#[derive(Deserialize)]
#[serde(untagged)]
enum RawItem {
    Full(Week, String, bool),
    Legacy(Week, String),
}

impl From<RawItem> for GazetteItem {
    fn from(raw: RawItem) -> Self {
        match raw {
            RawItem::Full(week, text, is_real) => Self { week, text, is_real },
            RawItem::Legacy(week, text) => Self {
                week,
                text,
                is_real: true,
            },
        }
    }
}

impl From<GazetteItem> for (Week, String, bool) {
    fn from(item: GazetteItem) -> Self {
        (item.week, item.text, item.is_real)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Gazette {
    #[serde(skip)]
    kind: GazetteKind,
    #[serde(default, alias = "weekly_news_history", alias = "chronicle_news_history")]
    history: Vec<GazetteItem>,
}

impl Gazette {
    pub fn weekly() -> Self {
        Self::default()
    }

    pub fn chronicle() -> Self {
        Self {
            kind: GazetteKind::Chronicle,
            history: Vec::new(),
        }
    }

    pub fn kind(&self) -> GazetteKind {
        self.kind
    }

    /// Restore the feed type after loading
    pub fn set_kind(&mut self, kind: GazetteKind) {
        self.kind = kind;
    }

    pub fn history(&self) -> &[GazetteItem] {
        &self.history
    }

    /// Print this week's edition, one item per company
    pub fn publish<R: Rng + ?Sized>(
        &mut self,
        companies: &BTreeMap<String, Company>,
        week: Week,
        rng: &mut R,
    ) -> Vec<GazetteItem> {
        let ratio = trust_ratio(week);
        let edition: Vec<GazetteItem> = companies
            .values()
            .map(|company| {
                let text = templates::render(self.kind.templates(), &company.name, &company.industry, rng);
                GazetteItem {
                    week,
                    text,
                    is_real: rng.gen_bool(ratio),
                }
            })
            .collect();
        self.history.extend(edition.iter().cloned());
        edition
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bourse_core::default_roster;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_trust_cycle() {
        assert_eq!(trust_ratio(1), 0.8);
        assert_eq!(trust_ratio(3), 0.8);
        assert_eq!(trust_ratio(4), 0.7);
        assert_eq!(trust_ratio(7), 0.5);
        assert_eq!(trust_ratio(9), 0.5);
        assert_eq!(trust_ratio(10), 0.6);
        assert_eq!(trust_ratio(12), 0.6);
        assert_eq!(trust_ratio(13), 0.8);
        assert_eq!(trust_ratio(0), 0.8);
    }

    #[test]
    fn test_one_item_per_company() {
        let mut rng = StdRng::seed_from_u64(5);
        let companies = default_roster(&mut rng);
        let mut gazette = Gazette::chronicle();
        let edition = gazette.publish(&companies, 4, &mut rng);
        assert_eq!(edition.len(), companies.len());
        assert!(edition.iter().all(|item| item.week == 4 && !item.text.contains('{')));
        assert_eq!(gazette.history().len(), companies.len());
    }

    #[test]
    fn test_history_serializes_as_triples() {
        let mut gazette = Gazette::weekly();
        gazette.history.push(GazetteItem {
            week: 2,
            text: "hello".into(),
            is_real: false,
        });
        let json = serde_json::to_string(&gazette).unwrap();
        assert_eq!(json, r#"{"history":[[2,"hello",false]]}"#);
    }

    #[test]
    fn test_legacy_pairs_load_as_real() {
        let json = r#"{"weekly_news_history": [[1, "old news"], [2, "newer", false]]}"#;
        let gazette: Gazette = serde_json::from_str(json).unwrap();
        assert_eq!(gazette.history().len(), 2);
        assert!(gazette.history()[0].is_real);
        assert!(!gazette.history()[1].is_real);
        assert_eq!(gazette.kind(), GazetteKind::Weekly);
    }
}
