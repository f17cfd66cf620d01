use std::collections::BTreeMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::{
    Company, ElfQueenWater, Gold, GoldCoin, HolyWater, QuantumSingularity, Treasury, VoidCatalyst,
    VoidStocks,
};

/// Every non-company instrument in the market
///
/// Missing entries in a save file fall back to their starting state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemedAssets {
    pub treasury: Treasury,
    pub quantum_singularity: QuantumSingularity,
    pub gold: Gold,
    pub holy_water: HolyWater,
    pub elf_queen_water: ElfQueenWater,
    pub gold_coin: GoldCoin,
    pub void_stocks: VoidStocks,
    pub void_catalyst: VoidCatalyst,
}

impl ThemedAssets {
    /// Step every themed price by one week
    pub fn update_prices(&mut self, companies: &BTreeMap<String, Company>, rng: &mut impl Rng) {
        self.gold.update_price(rng);
        self.holy_water.update_price(rng);
        self.elf_queen_water.update_price(rng);
        self.gold_coin.update_price(rng);
        self.void_stocks.update_price(companies);
        self.void_catalyst.update_price(rng);
    }
}
