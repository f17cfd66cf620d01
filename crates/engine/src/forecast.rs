//! Four-week lookahead prices
//!
//! The buffer holds, per company, the prices of the next four weeks. Every
//! pending impact is folded in at its countdown offset, so the week advance
//! only has to pop the front entry. Impacts are never applied twice: once a
//! price has been drawn it is moved, not recomputed.

use std::collections::BTreeMap;

use bourse_core::{Company, Price, floor_price};
use bourse_news::ImpactLedger;
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::cycle::ActiveMarketCycle;

pub const LOOKAHEAD_WEEKS: usize = 4;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FuturePriceBuffer {
    prices: BTreeMap<String, Vec<Price>>,
}

impl FuturePriceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, company: &str) -> Option<&[Price]> {
        self.prices.get(company).map(Vec::as_slice)
    }

    /// Next week's price for `company`
    pub fn next_price(&self, company: &str) -> Option<Price> {
        self.prices.get(company).and_then(|p| p.first().copied())
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// Every company has a full window and nothing else is buffered
    pub fn is_complete(&self, companies: &BTreeMap<String, Company>) -> bool {
        self.prices.len() == companies.len()
            && companies.keys().all(|name| {
                self.prices
                    .get(name)
                    .is_some_and(|p| p.len() == LOOKAHEAD_WEEKS)
            })
    }

    /// Rebuild every window from the live prices
    pub fn recompute<R: Rng>(
        &mut self,
        companies: &BTreeMap<String, Company>,
        ledger: &ImpactLedger,
        cycle: Option<&ActiveMarketCycle>,
        rng: &mut R,
    ) {
        self.prices.clear();
        for company in companies.values() {
            self.recompute_company(company, ledger, cycle, rng);
        }
        debug!("Recomputed lookahead for {} companies", companies.len());
    }

    pub fn recompute_company<R: Rng>(
        &mut self,
        company: &Company,
        ledger: &ImpactLedger,
        cycle: Option<&ActiveMarketCycle>,
        rng: &mut R,
    ) {
        let mut window = Vec::with_capacity(LOOKAHEAD_WEEKS);
        let mut price = company.price();
        for offset in 1..=LOOKAHEAD_WEEKS as u32 {
            price = step(company, price, offset, ledger, cycle, rng);
            window.push(price);
        }
        self.prices.insert(company.name.clone(), window);
    }

    /// Move each company's front entry into its live price
    pub fn apply_next(&mut self, companies: &mut BTreeMap<String, Company>) {
        for (name, company) in companies.iter_mut() {
            let Some(window) = self.prices.get_mut(name) else {
                continue;
            };
            if window.is_empty() {
                continue;
            }
            let price = window.remove(0);
            company.record_price(price);
        }
    }

    /// Append a fresh week+4 entry to every window
    ///
    /// Call after the ledger countdowns have been decremented, so impacts
    /// due at offset 4 are the ones landing four weeks from now.
    pub fn extend<R: Rng>(
        &mut self,
        companies: &BTreeMap<String, Company>,
        ledger: &ImpactLedger,
        cycle: Option<&ActiveMarketCycle>,
        rng: &mut R,
    ) {
        for company in companies.values() {
            let window = self.prices.entry(company.name.clone()).or_default();
            let last = window.last().copied().unwrap_or_else(|| company.price());
            let offset = (window.len() + 1) as u32;
            window.push(step(company, last, offset, ledger, cycle, rng));
        }
    }

    /// Scale a company's window after a trade moved its live price
    pub fn rebase(&mut self, company: &str, ratio: f64) {
        if let Some(window) = self.prices.get_mut(company) {
            for price in window.iter_mut() {
                *price = floor_price(*price * ratio);
            }
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Price])> {
        self.prices.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

/// One simulated week for `company` at lookahead `offset`
///
/// Drift comes from the active cycle while it still covers the offset,
/// otherwise from the random walk. Impacts due at the offset compound in
/// ledger order; a week without one mean-reverts instead.
fn step<R: Rng>(
    company: &Company,
    price: Price,
    offset: u32,
    ledger: &ImpactLedger,
    cycle: Option<&ActiveMarketCycle>,
    rng: &mut R,
) -> Price {
    let drift = match cycle.filter(|c| c.covers(offset)) {
        Some(cycle) => cycle.drift_factor(&company.industry, rng),
        None => company.walk_factor(rng),
    };
    let mut next = price * drift;

    let mut landed = false;
    for impact in ledger.due_for(&company.name, offset) {
        next *= impact.delayed_factor();
        landed = true;
    }
    if !landed {
        next = company.mean_revert(next);
    }
    floor_price(next)
}
