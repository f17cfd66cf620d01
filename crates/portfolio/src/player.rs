//! Player accounts
//!
//! Positions, cash and debt for one seat at the table. Human players and
//! hedge funds share this type; funds only differ in who picks the trades.

use std::collections::BTreeMap;

use bourse_core::{Company, QuantumSingularity, Side, Treasury};
use bourse_impact::{quote_shares, solve_buy, solve_sell};
use bourse_ports::{ImpactModel, MarketSnapshot};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::credit::CreditTerms;
use crate::error::{Result, TradeRejection};
use crate::fill::{Fill, SellAmount, TradeKind};
use crate::valuation::MarketView;

pub const STARTING_CASH: f64 = 50_000.0;

/// Long positions smaller than this are dropped after a sale
const DUST_SHARES: f64 = 0.0001;

fn default_cash() -> f64 {
    STARTING_CASH
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    #[serde(default = "default_cash")]
    pub cash: f64,
    /// Company name to fractional long shares
    #[serde(default)]
    pub portfolio: BTreeMap<String, f64>,
    /// Company name to whole shares borrowed and owed
    #[serde(default)]
    pub short_positions: BTreeMap<String, u64>,
    #[serde(default)]
    pub treasury_bonds: u64,
    #[serde(default)]
    pub quantum_singularity_units: u64,
    #[serde(default)]
    pub gold_ounces: u64,
    #[serde(default)]
    pub holy_water_vials: u64,
    #[serde(default)]
    pub elf_queen_water_vials: u64,
    #[serde(default)]
    pub gold_coins: u64,
    #[serde(default)]
    pub void_stocks_shares: u64,
    #[serde(default)]
    pub void_catalyst_owned: bool,
    #[serde(default)]
    pub borrowed_amount: f64,
    /// Interest-free, but every trade slips harder until it is repaid
    #[serde(default)]
    pub mystical_lender_debt: f64,
    #[serde(flatten)]
    pub credit: CreditTerms,
    #[serde(default)]
    pub researched_this_week: bool,
    #[serde(default)]
    pub research_history: BTreeMap<String, Vec<String>>,
}

impl Player {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_cash(name, STARTING_CASH)
    }

    pub fn with_cash(name: impl Into<String>, cash: f64) -> Self {
        Self {
            name: name.into(),
            cash,
            portfolio: BTreeMap::new(),
            short_positions: BTreeMap::new(),
            treasury_bonds: 0,
            quantum_singularity_units: 0,
            gold_ounces: 0,
            holy_water_vials: 0,
            elf_queen_water_vials: 0,
            gold_coins: 0,
            void_stocks_shares: 0,
            void_catalyst_owned: false,
            borrowed_amount: 0.0,
            mystical_lender_debt: 0.0,
            credit: CreditTerms::default(),
            researched_this_week: false,
            research_history: BTreeMap::new(),
        }
    }

    // ------------------------------------------------------------------
    // Valuation
    // ------------------------------------------------------------------

    /// Market value of long stock positions
    pub fn long_value(&self, view: MarketView<'_>) -> f64 {
        self.portfolio
            .iter()
            .filter_map(|(name, shares)| view.price(name).map(|p| p * shares))
            .sum()
    }

    /// Cost of buying back every short at the live price
    pub fn short_value(&self, view: MarketView<'_>) -> f64 {
        self.short_positions
            .iter()
            .filter_map(|(name, shares)| view.price(name).map(|p| p * *shares as f64))
            .sum()
    }

    fn themed_value(&self, view: MarketView<'_>, include_quantum: bool) -> f64 {
        let themed = view.themed;
        let mut value = self.treasury_bonds as f64 * themed.treasury.price
            + self.gold_ounces as f64 * themed.gold.price
            + self.holy_water_vials as f64 * themed.holy_water.price
            + self.elf_queen_water_vials as f64 * themed.elf_queen_water.price
            + self.gold_coins as f64 * themed.gold_coin.price
            + self.void_stocks_shares as f64 * themed.void_stocks.price;
        if self.void_catalyst_owned {
            value += themed.void_catalyst.price;
        }
        if include_quantum {
            value += self.quantum_singularity_units as f64 * themed.quantum_singularity.price;
        }
        value
    }

    /// Cash plus every holding minus short obligations
    pub fn net_worth(&self, view: MarketView<'_>) -> f64 {
        self.cash + self.long_value(view) - self.short_value(view) + self.themed_value(view, true)
    }

    /// Net worth minus debt
    pub fn equity(&self, view: MarketView<'_>) -> f64 {
        self.net_worth(view) - self.borrowed_amount - self.mystical_lender_debt
    }

    /// Equity counted for margin purposes, which ignores Quantum Singularity
    pub fn margin_equity(&self, view: MarketView<'_>) -> f64 {
        self.cash + self.long_value(view) - self.short_value(view) + self.themed_value(view, false)
            - self.borrowed_amount
            - self.mystical_lender_debt
    }

    /// Further borrowing allowed before hitting the leverage cap
    pub fn borrowing_capacity(&self, view: MarketView<'_>) -> f64 {
        (self.equity(view) * self.credit.max_leverage_ratio - self.borrowed_amount).max(0.0)
    }

    pub fn shares_of(&self, company: &str) -> f64 {
        self.portfolio.get(company).copied().unwrap_or(0.0)
    }

    pub fn shorted(&self, company: &str) -> u64 {
        self.short_positions.get(company).copied().unwrap_or(0)
    }

    // ------------------------------------------------------------------
    // Stock trades
    // ------------------------------------------------------------------

    /// Invest `dollars` of cash, optionally levered
    ///
    /// The position is worth `dollars × leverage`; the difference is added to
    /// the debt. Cash falls by exactly `dollars`.
    pub fn buy_stock(
        &mut self,
        company: &Company,
        dollars: f64,
        leverage: f64,
        model: &dyn ImpactModel,
        view: MarketView<'_>,
    ) -> Result<Fill> {
        if !(dollars > 0.0) {
            return Err(TradeRejection::InvalidAmount(format!("${dollars:.2}")));
        }
        if leverage < 1.0 {
            return Err(TradeRejection::InvalidAmount(format!("leverage {leverage:.2}x")));
        }
        if dollars > self.cash {
            return Err(TradeRejection::InsufficientFunds {
                needed: dollars,
                available: self.cash,
            });
        }

        let position = dollars * leverage;
        let borrowed = position - dollars;
        if leverage > 1.0 {
            let limit = self.equity(view) * self.credit.max_leverage_ratio;
            if self.borrowed_amount + borrowed > limit {
                let room = (limit - self.borrowed_amount).max(0.0);
                return Err(TradeRejection::LeverageExceeded {
                    max_leverage: (dollars + room) / dollars,
                });
            }
        }

        let quote = solve_buy(model, position, &MarketSnapshot::of(company));
        self.cash -= dollars;
        self.borrowed_amount += borrowed;
        *self.portfolio.entry(company.name.clone()).or_insert(0.0) += quote.shares;

        let mut fill = Fill::from_quote(company, TradeKind::Buy, &quote);
        fill.total = dollars;
        fill.borrowed = borrowed;
        debug!(
            "{} bought {:.4} {} @ {:.2} (${:.2}, {:.1}x)",
            self.name, fill.shares, company.name, fill.effective_price, position, leverage
        );
        Ok(fill)
    }

    pub fn sell_stock(
        &mut self,
        company: &Company,
        amount: SellAmount,
        model: &dyn ImpactModel,
    ) -> Result<Fill> {
        let held = self.shares_of(&company.name);
        if held <= 0.0 {
            return Err(TradeRejection::NoPosition(company.name.clone()));
        }

        let market = MarketSnapshot::of(company);
        let quote = match amount {
            SellAmount::Dollars(dollars) => {
                if !(dollars > 0.0) {
                    return Err(TradeRejection::InvalidAmount(format!("${dollars:.2}")));
                }
                solve_sell(model, dollars, held, &market)
            }
            SellAmount::Shares(shares) => {
                if !(shares > 0.0) {
                    return Err(TradeRejection::InvalidAmount(format!("{shares} shares")));
                }
                if shares > held {
                    return Err(TradeRejection::InsufficientHoldings {
                        asset: company.name.clone(),
                        held,
                        requested: shares,
                    });
                }
                quote_shares(model, Side::Sell, shares, &market)
            }
        };

        self.cash += quote.total;
        let remaining = held - quote.shares;
        if remaining < DUST_SHARES {
            self.portfolio.remove(&company.name);
        } else {
            self.portfolio.insert(company.name.clone(), remaining);
        }

        let fill = Fill::from_quote(company, TradeKind::Sell, &quote);
        debug!(
            "{} sold {:.4} {} @ {:.2}",
            self.name, fill.shares, company.name, fill.effective_price
        );
        Ok(fill)
    }

    /// Borrow `shares` and sell them
    ///
    /// Requires equity of at least the initial margin times the short value.
    pub fn short_sell(
        &mut self,
        company: &Company,
        shares: u64,
        model: &dyn ImpactModel,
        view: MarketView<'_>,
    ) -> Result<Fill> {
        if shares == 0 {
            return Err(TradeRejection::InvalidAmount("0 shares".into()));
        }
        let required = company.price() * shares as f64 * self.credit.short_initial_margin;
        let equity = self.equity(view);
        if equity < required {
            return Err(TradeRejection::InsufficientMargin { required, equity });
        }

        let quote = quote_shares(model, Side::Sell, shares as f64, &MarketSnapshot::of(company));
        self.cash += quote.total;
        *self.short_positions.entry(company.name.clone()).or_insert(0) += shares;
        debug!("{} shorted {} {} @ {:.2}", self.name, shares, company.name, quote.effective_price);
        Ok(Fill::from_quote(company, TradeKind::Short, &quote))
    }

    /// Buy back shorted shares
    pub fn cover_short(
        &mut self,
        company: &Company,
        shares: u64,
        model: &dyn ImpactModel,
    ) -> Result<Fill> {
        let held = self.shorted(&company.name);
        if shares == 0 {
            return Err(TradeRejection::InvalidAmount("0 shares".into()));
        }
        if held < shares {
            return Err(TradeRejection::InsufficientHoldings {
                asset: format!("{} shorts", company.name),
                held: held as f64,
                requested: shares as f64,
            });
        }

        let quote = quote_shares(model, Side::Buy, shares as f64, &MarketSnapshot::of(company));
        if quote.total > self.cash {
            return Err(TradeRejection::InsufficientFunds {
                needed: quote.total,
                available: self.cash,
            });
        }
        self.cash -= quote.total;
        if held == shares {
            self.short_positions.remove(&company.name);
        } else {
            self.short_positions.insert(company.name.clone(), held - shares);
        }
        debug!("{} covered {} {} @ {:.2}", self.name, shares, company.name, quote.effective_price);
        Ok(Fill::from_quote(company, TradeKind::Cover, &quote))
    }

    // ------------------------------------------------------------------
    // Bonds
    // ------------------------------------------------------------------

    pub fn buy_treasury(&mut self, treasury: &Treasury, bonds: u64) -> Result<f64> {
        let cost = treasury.price * bonds as f64;
        if bonds == 0 {
            return Err(TradeRejection::InvalidAmount("0 bonds".into()));
        }
        self.charge(cost)?;
        self.treasury_bonds += bonds;
        Ok(cost)
    }

    /// Bonds always sell at par
    pub fn sell_treasury(&mut self, treasury: &Treasury, bonds: u64) -> Result<f64> {
        if bonds == 0 || self.treasury_bonds < bonds {
            return Err(TradeRejection::InsufficientHoldings {
                asset: "treasury bonds".into(),
                held: self.treasury_bonds as f64,
                requested: bonds as f64,
            });
        }
        let value = treasury.price * bonds as f64;
        self.cash += value;
        self.treasury_bonds -= bonds;
        Ok(value)
    }

    /// Permanent purchase, units can never be sold
    pub fn buy_quantum_singularity(&mut self, qs: &QuantumSingularity, units: u64) -> Result<f64> {
        if units == 0 {
            return Err(TradeRejection::InvalidAmount("0 units".into()));
        }
        let cost = qs.price * units as f64;
        self.charge(cost)?;
        self.quantum_singularity_units += units;
        Ok(cost)
    }

    pub(crate) fn charge(&mut self, cost: f64) -> Result<()> {
        if cost > self.cash {
            return Err(TradeRejection::InsufficientFunds {
                needed: cost,
                available: self.cash,
            });
        }
        self.cash -= cost;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Credit
    // ------------------------------------------------------------------

    pub fn borrow(&mut self, amount: f64, view: MarketView<'_>) -> Result<()> {
        if !(amount > 0.0) {
            return Err(TradeRejection::InvalidAmount(format!("${amount:.2}")));
        }
        let available = self.borrowing_capacity(view);
        if amount > available {
            return Err(TradeRejection::BorrowLimitExceeded { available });
        }
        self.borrowed_amount += amount;
        self.cash += amount;
        Ok(())
    }

    /// Pay down debt, never more than is owed; returns the amount repaid
    pub fn repay(&mut self, amount: f64) -> Result<f64> {
        if !(amount > 0.0) {
            return Err(TradeRejection::InvalidAmount(format!("${amount:.2}")));
        }
        if amount > self.cash {
            return Err(TradeRejection::InsufficientFunds {
                needed: amount,
                available: self.cash,
            });
        }
        let repaid = amount.min(self.borrowed_amount);
        self.borrowed_amount -= repaid;
        self.cash -= repaid;
        Ok(repaid)
    }

    /// Add a week of interest to the debt
    pub fn apply_interest(&mut self) -> f64 {
        if self.borrowed_amount <= 0.0 {
            return 0.0;
        }
        let interest = self.borrowed_amount * self.credit.interest_rate_weekly / 100.0;
        self.borrowed_amount += interest;
        interest
    }

    /// Charge a week of borrow fees on open shorts
    pub fn apply_short_borrow_fees(&mut self, companies: &BTreeMap<String, Company>) -> f64 {
        let fees: f64 = self
            .short_positions
            .iter()
            .filter_map(|(name, shares)| companies.get(name).map(|c| c.price() * *shares as f64))
            .map(|value| value * self.credit.short_borrow_fee_weekly / 100.0)
            .sum();
        self.cash -= fees;
        fees
    }

    /// Monthly Quantum Singularity payout
    pub fn apply_quantum_income(&mut self, qs: &QuantumSingularity) -> f64 {
        let income = qs.monthly_return(self.quantum_singularity_units);
        self.cash += income;
        income
    }

    // ------------------------------------------------------------------
    // Research bookkeeping
    // ------------------------------------------------------------------

    pub fn record_research(&mut self, company: &str, hint: String) {
        self.research_history.entry(company.to_string()).or_default().push(hint);
        self.researched_this_week = true;
    }

    pub fn reset_weekly_research(&mut self) {
        self.researched_this_week = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use bourse_core::{LiquidityTier, ThemedAssets};
    use bourse_impact::{SquareRootModel, ZeroImpact};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn market(price: f64) -> BTreeMap<String, Company> {
        let mut rng = StdRng::seed_from_u64(0);
        let company = Company::new(
            "Acme",
            "Technology",
            price,
            5.0,
            LiquidityTier::Medium,
            10_000_000_000.0,
            &mut rng,
        );
        BTreeMap::from([("Acme".to_string(), company)])
    }

    #[test]
    fn test_fractional_buy_with_zero_impact() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let mut player = Player::new("Ann");

        let fill = player
            .buy_stock(&companies["Acme"], 250.0, 1.0, &ZeroImpact, view)
            .unwrap();
        assert_eq!(fill.shares, 2.5);
        assert_eq!(player.cash, STARTING_CASH - 250.0);
        assert_eq!(player.shares_of("Acme"), 2.5);
        assert_eq!(fill.price_factor, 1.0);
    }

    #[test]
    fn test_leveraged_buy_adds_debt() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let mut player = Player::new("Ann");

        let fill = player
            .buy_stock(&companies["Acme"], 1_000.0, 3.0, &ZeroImpact, view)
            .unwrap();
        assert_relative_eq!(fill.shares, 30.0, epsilon = 1e-9);
        assert_relative_eq!(player.borrowed_amount, 2_000.0);
        assert_relative_eq!(player.cash, STARTING_CASH - 1_000.0);
    }

    #[test]
    fn test_leverage_cap() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let mut player = Player::with_cash("Ann", 1_000.0);

        let err = player
            .buy_stock(&companies["Acme"], 1_000.0, 7.0, &ZeroImpact, view)
            .unwrap_err();
        match err {
            TradeRejection::LeverageExceeded { max_leverage } => {
                assert_relative_eq!(max_leverage, 6.0, epsilon = 1e-9)
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(player.cash, 1_000.0);
    }

    #[test]
    fn test_sell_by_dollars_and_shares() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let acme = &companies["Acme"];
        let mut player = Player::new("Ann");
        player.buy_stock(acme, 1_000.0, 1.0, &ZeroImpact, view).unwrap();

        let fill = player.sell_stock(acme, SellAmount::Dollars(300.0), &ZeroImpact).unwrap();
        assert_relative_eq!(fill.shares, 3.0, epsilon = 1e-9);
        assert_relative_eq!(player.shares_of("Acme"), 7.0, epsilon = 1e-9);

        let err = player.sell_stock(acme, SellAmount::Shares(8.0), &ZeroImpact).unwrap_err();
        assert!(matches!(err, TradeRejection::InsufficientHoldings { .. }));

        // asking for more dollars than the position is worth sells it all
        let fill = player.sell_stock(acme, SellAmount::Dollars(5_000.0), &ZeroImpact).unwrap();
        assert_relative_eq!(fill.total, 700.0, epsilon = 1e-6);
        assert!(player.portfolio.is_empty());
        assert_relative_eq!(player.cash, STARTING_CASH, epsilon = 1e-6);
    }

    #[test]
    fn test_sell_without_position() {
        let companies = market(100.0);
        let mut player = Player::new("Ann");
        let err = player
            .sell_stock(&companies["Acme"], SellAmount::Shares(1.0), &ZeroImpact)
            .unwrap_err();
        assert_eq!(err, TradeRejection::NoPosition("Acme".into()));
    }

    #[test]
    fn test_slippage_worsens_fills() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let acme = &companies["Acme"];
        let model = SquareRootModel::default_model();
        let mut player = Player::new("Ann");

        let buy = player.buy_stock(acme, 20_000.0, 1.0, &model, view).unwrap();
        assert!(buy.effective_price > 100.0);
        assert!(buy.price_factor > 1.0);

        let sell = player.sell_stock(acme, SellAmount::Shares(buy.shares), &model).unwrap();
        assert!(sell.effective_price < 100.0);
        assert!(sell.price_factor < 1.0);
        assert!(player.cash < STARTING_CASH);
    }

    #[test]
    fn test_short_margin_and_cover() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let acme = &companies["Acme"];
        let mut player = Player::with_cash("Ann", 1_500.0);

        let err = player.short_sell(acme, 11, &ZeroImpact, view).unwrap_err();
        assert!(matches!(err, TradeRejection::InsufficientMargin { .. }));

        let fill = player.short_sell(acme, 10, &ZeroImpact, view).unwrap();
        assert_eq!(fill.kind, TradeKind::Short);
        assert_eq!(player.shorted("Acme"), 10);
        assert_relative_eq!(player.cash, 2_500.0);

        let err = player.cover_short(acme, 11, &ZeroImpact).unwrap_err();
        assert!(matches!(err, TradeRejection::InsufficientHoldings { .. }));

        player.cover_short(acme, 4, &ZeroImpact).unwrap();
        assert_eq!(player.shorted("Acme"), 6);
        player.cover_short(acme, 6, &ZeroImpact).unwrap();
        assert!(player.short_positions.is_empty());
        assert_relative_eq!(player.cash, 1_500.0);
    }

    #[test]
    fn test_borrow_repay_interest() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let mut player = Player::with_cash("Ann", 10_000.0);

        assert!(matches!(
            player.borrow(60_000.0, view),
            Err(TradeRejection::BorrowLimitExceeded { .. })
        ));
        player.borrow(10_000.0, view).unwrap();
        assert_relative_eq!(player.cash, 20_000.0);

        let interest = player.apply_interest();
        assert_relative_eq!(interest, 11.5, epsilon = 1e-9);
        assert_relative_eq!(player.borrowed_amount, 10_011.5, epsilon = 1e-9);

        let repaid = player.repay(15_000.0).unwrap();
        assert_relative_eq!(repaid, 10_011.5, epsilon = 1e-9);
        assert_eq!(player.borrowed_amount, 0.0);
    }

    #[test]
    fn test_short_fees_and_quantum_income() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let mut player = Player::with_cash("Ann", 5_000.0);
        player.short_positions.insert("Acme".into(), 50);

        let fees = player.apply_short_borrow_fees(&companies);
        assert_relative_eq!(fees, 1.0, epsilon = 1e-9);

        player.buy_quantum_singularity(&themed.quantum_singularity, 2).unwrap();
        let income = player.apply_quantum_income(&themed.quantum_singularity);
        assert_relative_eq!(income, 40.0);
    }

    #[test]
    fn test_treasury_round_trip() {
        let treasury = Treasury::default();
        let mut player = Player::with_cash("Ann", 1_000.0);
        assert_eq!(player.buy_treasury(&treasury, 5).unwrap(), 500.0);
        assert!(player.buy_treasury(&treasury, 6).is_err());
        assert!(player.sell_treasury(&treasury, 6).is_err());
        assert_eq!(player.sell_treasury(&treasury, 5).unwrap(), 500.0);
        assert_eq!(player.cash, 1_000.0);
    }

    #[test]
    fn test_equity_excludes_debt_and_margin_excludes_quantum() {
        let companies = market(100.0);
        let themed = ThemedAssets::default();
        let view = MarketView::new(&companies, &themed);
        let mut player = Player::with_cash("Ann", 10_000.0);
        player.portfolio.insert("Acme".into(), 10.0);
        player.quantum_singularity_units = 2;
        player.borrowed_amount = 500.0;

        assert_relative_eq!(player.net_worth(view), 13_000.0);
        assert_relative_eq!(player.equity(view), 12_500.0);
        assert_relative_eq!(player.margin_equity(view), 10_500.0);
    }

    #[test]
    fn test_legacy_player_loads() {
        let json = r#"{"name": "Old", "cash": 1234.0, "portfolio": {"TechCorp": 1.5}}"#;
        let player: Player = serde_json::from_str(json).unwrap();
        assert_eq!(player.cash, 1234.0);
        assert_eq!(player.credit, CreditTerms::default());
        assert!(player.short_positions.is_empty());
        assert_eq!(player.shares_of("TechCorp"), 1.5);
    }
}
