//! Commodity-style themed assets
//!
//! Each asset keeps a rolling 52-week history and its own pricing rule.

use rand::Rng;
use serde::{Deserialize, Serialize};

const HISTORY_WEEKS: usize = 52;

fn push_history(history: &mut Vec<f64>, price: f64) {
    history.push(price);
    if history.len() > HISTORY_WEEKS {
        history.remove(0);
    }
}

fn walk(price: f64, volatility: f64, floor: f64, rng: &mut impl Rng) -> f64 {
    let change = if volatility > 0.0 {
        rng.gen_range(-volatility..=volatility)
    } else {
        0.0
    };
    (price * (1.0 + change / 100.0)).max(floor)
}

/// Physical gold, a low-volatility safe haven
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Gold {
    pub price: f64,
    pub base_volatility: f64,
    pub price_history: Vec<f64>,
}

impl Gold {
    pub const FLOOR: f64 = 100.0;

    pub fn update_price(&mut self, rng: &mut impl Rng) {
        self.price = walk(self.price, self.base_volatility, Self::FLOOR, rng);
        push_history(&mut self.price_history, self.price);
    }
}

impl Default for Gold {
    fn default() -> Self {
        Self {
            price: 2000.0,
            base_volatility: 2.5,
            price_history: Vec::new(),
        }
    }
}

/// Fantasy currency, stable with small random walks
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GoldCoin {
    pub price: f64,
    pub base_volatility: f64,
    pub price_history: Vec<f64>,
}

impl GoldCoin {
    pub const FLOOR: f64 = 0.10;

    pub fn update_price(&mut self, rng: &mut impl Rng) {
        self.price = walk(self.price, self.base_volatility, Self::FLOOR, rng);
        push_history(&mut self.price_history, self.price);
    }
}

impl Default for GoldCoin {
    fn default() -> Self {
        Self {
            price: 2.0,
            base_volatility: 1.5,
            price_history: Vec::new(),
        }
    }
}

/// Blessed water with occasional divine swings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HolyWater {
    pub price: f64,
    pub base_volatility: f64,
    pub price_history: Vec<f64>,
    /// 1.2 right after a blessing, 0.8 after a curse, decaying back to 1.0
    pub blessing_intensity: f64,
}

impl HolyWater {
    pub const FLOOR: f64 = 100.0;
    const DIVINE_CHANCE: f64 = 0.10;

    pub fn update_price(&mut self, rng: &mut impl Rng) {
        let mut change = if self.base_volatility > 0.0 {
            rng.gen_range(-self.base_volatility..=self.base_volatility)
        } else {
            0.0
        };

        if rng.gen_bool(Self::DIVINE_CHANCE) {
            let blessed = rng.gen_bool(0.5);
            let swing = rng.gen_range(5.0..=15.0);
            if blessed {
                change += swing;
                self.blessing_intensity = 1.2;
            } else {
                change -= swing;
                self.blessing_intensity = 0.8;
            }
        } else {
            self.blessing_intensity = self.blessing_intensity * 0.9 + 0.1;
        }

        self.price = (self.price * (1.0 + change / 100.0)).max(Self::FLOOR);
        push_history(&mut self.price_history, self.price);
    }

    pub fn is_blessed(&self) -> bool {
        self.blessing_intensity > 1.1
    }

    pub fn is_cursed(&self) -> bool {
        self.blessing_intensity < 0.9
    }
}

impl Default for HolyWater {
    fn default() -> Self {
        Self {
            price: 1800.0,
            base_volatility: 4.5,
            price_history: Vec::new(),
            blessing_intensity: 1.0,
        }
    }
}

/// Meme commodity that doubles or halves every sixth week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElfQueenWater {
    pub price: f64,
    pub price_history: Vec<f64>,
    pub weeks_since_change: u32,
}

impl ElfQueenWater {
    pub const CHANGE_INTERVAL: u32 = 6;

    pub fn update_price(&mut self, rng: &mut impl Rng) {
        self.weeks_since_change += 1;
        if self.weeks_since_change >= Self::CHANGE_INTERVAL {
            self.price *= if rng.gen_bool(0.5) { 2.0 } else { 0.5 };
            self.weeks_since_change = 0;
        }
        push_history(&mut self.price_history, self.price);
    }

    pub fn weeks_until_change(&self) -> u32 {
        Self::CHANGE_INTERVAL.saturating_sub(self.weeks_since_change)
    }
}

impl Default for ElfQueenWater {
    fn default() -> Self {
        Self {
            price: 4000.0,
            price_history: Vec::new(),
            weeks_since_change: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_gold_respects_floor_and_history_window() {
        let mut gold = Gold {
            price: 100.0,
            base_volatility: 50.0,
            price_history: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..80 {
            gold.update_price(&mut rng);
            assert!(gold.price >= Gold::FLOOR);
        }
        assert_eq!(gold.price_history.len(), HISTORY_WEEKS);
    }

    #[test]
    fn test_gold_coin_floor() {
        let mut coin = GoldCoin {
            price: 0.10,
            base_volatility: 90.0,
            price_history: Vec::new(),
        };
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..50 {
            coin.update_price(&mut rng);
            assert!(coin.price >= GoldCoin::FLOOR);
        }
    }

    #[test]
    fn test_elf_queen_water_changes_every_sixth_week() {
        let mut water = ElfQueenWater::default();
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..5 {
            water.update_price(&mut rng);
            assert_eq!(water.price, 4000.0);
        }
        water.update_price(&mut rng);
        assert!(water.price == 8000.0 || water.price == 2000.0);
        assert_eq!(water.weeks_since_change, 0);
        assert_eq!(water.weeks_until_change(), 6);
    }

    #[test]
    fn test_holy_water_intensity_decays_or_swings() {
        let mut water = HolyWater::default();
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..200 {
            water.update_price(&mut rng);
            assert!(water.price >= HolyWater::FLOOR);
            assert!((0.8..=1.2).contains(&water.blessing_intensity));
        }
    }

    #[test]
    fn test_legacy_holy_water_defaults_intensity() {
        let water: HolyWater =
            serde_json::from_str(r#"{"price": 1500.0, "base_volatility": 4.5, "price_history": []}"#)
                .unwrap();
        assert_eq!(water.blessing_intensity, 1.0);
        assert_eq!(water.price, 1500.0);
    }
}
