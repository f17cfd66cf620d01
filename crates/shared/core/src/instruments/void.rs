use std::collections::{BTreeMap, BTreeSet};

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Company;

/// Shares that mirror a listed company on odd weeks and vanish on even weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoidStocks {
    pub price: f64,
    pub weeks_elapsed: u32,
    pub current_company_index: usize,
    pub company_names: Vec<String>,
    pub is_void_week: bool,
}

impl Default for VoidStocks {
    fn default() -> Self {
        Self {
            price: 0.0,
            weeks_elapsed: 0,
            current_company_index: 0,
            company_names: Vec::new(),
            is_void_week: true,
        }
    }
}

impl VoidStocks {
    pub fn update_price(&mut self, companies: &BTreeMap<String, Company>) {
        self.weeks_elapsed += 1;
        if self.company_names.is_empty() {
            // BTreeMap keys are already sorted
            self.company_names = companies.keys().cloned().collect();
        }

        if self.weeks_elapsed % 2 == 1 {
            self.is_void_week = false;
            self.price = if self.company_names.is_empty() {
                0.0
            } else {
                let name = &self.company_names[self.current_company_index % self.company_names.len()];
                self.current_company_index += 1;
                companies.get(name).map(Company::price).unwrap_or(0.0)
            };
        } else {
            self.is_void_week = true;
            self.price = 0.0;
        }
    }

    /// Company currently mirrored, `None` during the void state
    pub fn current_company_name(&self) -> Option<&str> {
        if self.is_void_week || self.company_names.is_empty() {
            return None;
        }
        let len = self.company_names.len();
        let idx = (self.current_company_index + len - 1) % len;
        Some(self.company_names[idx].as_str())
    }
}

/// Reasons the single Void Catalyst unit cannot be claimed
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CatalystUnavailable {
    #[error("Void Catalyst is already owned by {0}")]
    AlreadyOwned(String),

    #[error("already owned this rotation, waiting for: {}", .0.join(", "))]
    WaitingForOthers(Vec<String>),

    #[error("rotation complete, availability has been reset")]
    RotationReset,
}

/// A single unit that always appreciates and sells itself after four weeks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VoidCatalyst {
    pub price: f64,
    pub is_owned: bool,
    pub owner_name: Option<String>,
    pub weeks_owned: u32,
    pub players_owned_this_cycle: BTreeSet<String>,
}

impl Default for VoidCatalyst {
    fn default() -> Self {
        Self {
            price: 100_000.0,
            is_owned: false,
            owner_name: None,
            weeks_owned: 0,
            players_owned_this_cycle: BTreeSet::new(),
        }
    }
}

impl VoidCatalyst {
    pub const HOLD_WEEKS: u32 = 4;

    /// Appreciate 5..10% and age the current ownership
    pub fn update_price(&mut self, rng: &mut impl Rng) {
        let increase = rng.gen_range(5.0..=10.0);
        self.price *= 1.0 + increase / 100.0;
        if self.is_owned {
            self.weeks_owned += 1;
        }
    }

    /// Check the fair-rotation rules without changing ownership
    ///
    /// When every human has had a turn the rotation resets, but the player
    /// asking still has to wait for the next opportunity.
    pub fn check_available(
        &mut self,
        player: &str,
        human_players: &[String],
    ) -> Result<(), CatalystUnavailable> {
        if self.is_owned {
            let owner = self.owner_name.clone().unwrap_or_default();
            return Err(CatalystUnavailable::AlreadyOwned(owner));
        }
        if self.players_owned_this_cycle.contains(player) {
            if self.players_owned_this_cycle.len() >= human_players.len() {
                self.players_owned_this_cycle.clear();
                return Err(CatalystUnavailable::RotationReset);
            }
            let waiting = human_players
                .iter()
                .filter(|name| !self.players_owned_this_cycle.contains(name.as_str()))
                .cloned()
                .collect();
            return Err(CatalystUnavailable::WaitingForOthers(waiting));
        }
        Ok(())
    }

    /// Take ownership for `player`
    pub fn claim(&mut self, player: &str, human_players: &[String]) -> Result<(), CatalystUnavailable> {
        self.check_available(player, human_players)?;
        self.is_owned = true;
        self.owner_name = Some(player.to_string());
        self.weeks_owned = 0;
        self.players_owned_this_cycle.insert(player.to_string());
        Ok(())
    }

    /// Drop ownership without touching the rotation
    pub fn release(&mut self) {
        self.is_owned = false;
        self.owner_name = None;
        self.weeks_owned = 0;
    }

    /// Sell automatically once held long enough, returning `(owner, price)`
    pub fn check_auto_sell(&mut self) -> Option<(String, f64)> {
        if self.is_owned && self.weeks_owned >= Self::HOLD_WEEKS {
            let owner = self.owner_name.clone().unwrap_or_default();
            let price = self.price;
            self.release();
            return Some((owner, price));
        }
        None
    }
}
