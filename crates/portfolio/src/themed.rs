//! Trades in the themed instruments
//!
//! All themed assets trade at their posted price without slippage.

use bourse_core::{ThemedAssets, VoidCatalyst};
use log::info;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::{Result, TradeRejection};
use crate::player::Player;

/// Chance the Void Catalyst sells itself back the moment it is bought
const CATALYST_INSTANT_RESALE: f64 = 0.10;

/// Themed assets that can be bought and sold in whole units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemedAsset {
    Gold,
    HolyWater,
    ElfQueenWater,
    GoldCoin,
    VoidStocks,
}

impl ThemedAsset {
    pub const ALL: [ThemedAsset; 5] = [
        ThemedAsset::Gold,
        ThemedAsset::HolyWater,
        ThemedAsset::ElfQueenWater,
        ThemedAsset::GoldCoin,
        ThemedAsset::VoidStocks,
    ];

    pub fn price(&self, themed: &ThemedAssets) -> f64 {
        match self {
            ThemedAsset::Gold => themed.gold.price,
            ThemedAsset::HolyWater => themed.holy_water.price,
            ThemedAsset::ElfQueenWater => themed.elf_queen_water.price,
            ThemedAsset::GoldCoin => themed.gold_coin.price,
            ThemedAsset::VoidStocks => themed.void_stocks.price,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ThemedAsset::Gold => "Gold",
            ThemedAsset::HolyWater => "Holy Water",
            ThemedAsset::ElfQueenWater => "Elf Queen's Water",
            ThemedAsset::GoldCoin => "Gold Coin",
            ThemedAsset::VoidStocks => "Void Stocks",
        }
    }

    fn holding<'a>(&self, player: &'a mut Player) -> &'a mut u64 {
        match self {
            ThemedAsset::Gold => &mut player.gold_ounces,
            ThemedAsset::HolyWater => &mut player.holy_water_vials,
            ThemedAsset::ElfQueenWater => &mut player.elf_queen_water_vials,
            ThemedAsset::GoldCoin => &mut player.gold_coins,
            ThemedAsset::VoidStocks => &mut player.void_stocks_shares,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ThemedFill {
    pub asset: ThemedAsset,
    pub units: u64,
    pub price: f64,
    pub total: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CatalystPurchase {
    Bought { price: f64 },
    /// Sold straight back at the purchase price, nothing gained or lost
    InstantlyResold { price: f64 },
}

impl Player {
    pub fn buy_themed(
        &mut self,
        asset: ThemedAsset,
        units: u64,
        themed: &ThemedAssets,
    ) -> Result<ThemedFill> {
        if units == 0 {
            return Err(TradeRejection::InvalidAmount(format!("0 {}", asset.display_name())));
        }
        if asset == ThemedAsset::VoidStocks && themed.void_stocks.is_void_week {
            return Err(TradeRejection::VoidState);
        }
        let price = asset.price(themed);
        let total = price * units as f64;
        self.charge(total)?;
        *asset.holding(self) += units;
        Ok(ThemedFill {
            asset,
            units,
            price,
            total,
        })
    }

    pub fn sell_themed(
        &mut self,
        asset: ThemedAsset,
        units: u64,
        themed: &ThemedAssets,
    ) -> Result<ThemedFill> {
        let held = *asset.holding(self);
        if units == 0 || held < units {
            return Err(TradeRejection::InsufficientHoldings {
                asset: asset.display_name().to_string(),
                held: held as f64,
                requested: units as f64,
            });
        }
        let price = asset.price(themed);
        let total = price * units as f64;
        self.cash += total;
        *asset.holding(self) -= units;
        Ok(ThemedFill {
            asset,
            units,
            price,
            total,
        })
    }

    /// Buy the single Void Catalyst unit under the fair-rotation rules
    pub fn buy_void_catalyst(
        &mut self,
        catalyst: &mut VoidCatalyst,
        human_players: &[String],
        rng: &mut impl Rng,
    ) -> Result<CatalystPurchase> {
        if self.void_catalyst_owned {
            return Err(TradeRejection::AlreadyOwnCatalyst);
        }
        let price = catalyst.price;
        if price > self.cash {
            return Err(TradeRejection::InsufficientFunds {
                needed: price,
                available: self.cash,
            });
        }
        catalyst.claim(&self.name, human_players)?;
        self.cash -= price;
        self.void_catalyst_owned = true;

        if rng.gen_bool(CATALYST_INSTANT_RESALE) {
            catalyst.release();
            self.cash += price;
            self.void_catalyst_owned = false;
            info!("{} bought the Void Catalyst and it instantly resold", self.name);
            return Ok(CatalystPurchase::InstantlyResold { price });
        }
        info!("{} bought the Void Catalyst for ${price:.2}", self.name);
        Ok(CatalystPurchase::Bought { price })
    }

    /// Collect the Void Catalyst's automatic sale once it has been held long enough
    pub fn collect_void_catalyst(&mut self, catalyst: &mut VoidCatalyst) -> Option<f64> {
        if !self.void_catalyst_owned || catalyst.owner_name.as_deref() != Some(self.name.as_str()) {
            return None;
        }
        let (_, price) = catalyst.check_auto_sell()?;
        self.cash += price;
        self.void_catalyst_owned = false;
        info!("Void Catalyst auto-sold for {} at ${price:.2}", self.name);
        Some(price)
    }
}
