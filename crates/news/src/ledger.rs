//! Ledger of published impacts still waiting for their delayed stage

use std::collections::BTreeSet;

use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::impact::PendingNewsImpact;

/// Ordered list of pending impacts
///
/// Insertion order is the order impacts compound when several land on the
/// same company in the same week. An impact leaves the ledger exactly once,
/// on the tick its countdown reaches zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImpactLedger {
    impacts: Vec<PendingNewsImpact>,
}

impl ImpactLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, impact: PendingNewsImpact) {
        self.impacts.push(impact);
    }

    pub fn len(&self) -> usize {
        self.impacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.impacts.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PendingNewsImpact> {
        self.impacts.iter()
    }

    pub fn get(&self, id: Uuid) -> Option<&PendingNewsImpact> {
        self.impacts.iter().find(|i| i.id == id)
    }

    /// Impacts landing on `company` exactly `offset` weeks from now, in ledger order
    pub fn due_for<'a>(
        &'a self,
        company: &'a str,
        offset: u32,
    ) -> impl Iterator<Item = &'a PendingNewsImpact> + 'a {
        self.impacts
            .iter()
            .filter(move |i| i.company_name == company && i.weeks_until_impact == offset)
    }

    pub fn for_company<'a>(&'a self, company: &'a str) -> impl Iterator<Item = &'a PendingNewsImpact> + 'a {
        self.impacts.iter().filter(move |i| i.company_name == company)
    }

    /// Companies referenced by at least one impact
    pub fn companies(&self) -> BTreeSet<&str> {
        self.impacts.iter().map(|i| i.company_name.as_str()).collect()
    }

    /// Count every countdown down by one week
    ///
    /// Impacts reaching zero are removed and returned in ledger order. Their
    /// price move is already in the buffered price, so callers only report
    /// them.
    pub fn tick(&mut self) -> Vec<PendingNewsImpact> {
        for impact in &mut self.impacts {
            impact.weeks_until_impact = impact.weeks_until_impact.saturating_sub(1);
        }
        let (resolved, pending): (Vec<_>, Vec<_>) = std::mem::take(&mut self.impacts)
            .into_iter()
            .partition(|i| i.weeks_until_impact == 0);
        self.impacts = pending;
        if !resolved.is_empty() {
            info!("Resolved {} news impact(s), {} pending", resolved.len(), self.impacts.len());
        }
        resolved
    }

    /// Move impacts already at zero to land next week
    ///
    /// Only a hand-edited or damaged save holds these; left alone, the next
    /// tick would report them without the move ever reaching a price.
    /// Returns how many were moved.
    pub fn reschedule_overdue(&mut self) -> usize {
        let mut moved = 0;
        for impact in self.impacts.iter_mut().filter(|i| i.weeks_until_impact == 0) {
            impact.weeks_until_impact = 1;
            moved += 1;
        }
        moved
    }

    /// Give every hoax loaded without a reversal size one drawn from [min, max]
    pub fn fill_missing_reversals<R: Rng + ?Sized>(&mut self, min: f64, max: f64, rng: &mut R) {
        for impact in &mut self.impacts {
            impact.ensure_reversal(min, max, rng);
        }
    }
}

impl<'a> IntoIterator for &'a ImpactLedger {
    type Item = &'a PendingNewsImpact;
    type IntoIter = std::slice::Iter<'a, PendingNewsImpact>;

    fn into_iter(self) -> Self::IntoIter {
        self.impacts.iter()
    }
}
