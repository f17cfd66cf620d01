use std::cmp::Ordering;
use std::collections::BTreeMap;

use bourse_core::{Company, Week};
use bourse_impact::SquareRootModel;
use bourse_portfolio::{CatalystPurchase, Fill, Player, SellAmount, ThemedAsset, ThemedFill};
use bourse_strategy::HedgeFund;
use log::info;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::application::desk::TradeDesk;
use crate::application::reports::{Standing, WeekOpening, WeekReport};
use crate::application::week;
use crate::config::EngineConfig;
use crate::error::{EngineError, Result};
use crate::forecast::FuturePriceBuffer;
use crate::research::research_hint;
use crate::state::GameState;

/// A running game: persisted state plus its configuration, impact model and
/// random source
pub struct Market {
    pub(crate) state: GameState,
    pub(crate) config: EngineConfig,
    pub(crate) model: SquareRootModel,
    pub(crate) rng: StdRng,
}

pub(crate) fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Run `step` on a copy of the state and random source, keeping the result
/// only if it succeeds
fn staged<T>(
    state: &mut GameState,
    rng: &mut StdRng,
    step: impl FnOnce(&mut GameState, &mut StdRng) -> Result<T>,
) -> Result<T> {
    let mut next_state = state.clone();
    let mut next_rng = rng.clone();
    let out = step(&mut next_state, &mut next_rng)?;
    *state = next_state;
    *rng = next_rng;
    Ok(out)
}

impl Market {
    /// Start a new game with the default roster
    pub fn new(config: EngineConfig, player_names: &[String]) -> Result<Self> {
        config.validate()?;
        for (i, name) in player_names.iter().enumerate() {
            if name.trim().is_empty() || player_names[..i].contains(name) {
                return Err(EngineError::InvalidConfig(format!("bad or repeated player name {name:?}")));
            }
        }
        let mut rng = seeded_rng(config.seed);
        let state = GameState::new(&config, player_names, &mut rng);
        info!(
            "New game: {} companies, {} player(s), {} fund(s)",
            state.companies.len(),
            state.players.len(),
            state.hedge_funds.len()
        );
        Ok(Self::from_parts(state, config, rng))
    }

    pub(crate) fn from_parts(state: GameState, config: EngineConfig, rng: StdRng) -> Self {
        let model = SquareRootModel::new(config.impact.clone());
        Self {
            state,
            config,
            model,
            rng,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct access for scenario setup; call [`Market::recompute_forecast`]
    /// after changing prices or impacts
    pub fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn week(&self) -> Week {
        self.state.week_number
    }

    pub fn companies(&self) -> &BTreeMap<String, Company> {
        &self.state.companies
    }

    pub fn company(&self, name: &str) -> Result<&Company> {
        self.state.company(name)
    }

    pub fn players(&self) -> &[Player] {
        &self.state.players
    }

    pub fn player(&self, name: &str) -> Result<&Player> {
        self.state.player(name)
    }

    pub fn hedge_funds(&self) -> &[HedgeFund] {
        &self.state.hedge_funds
    }

    pub fn future_prices(&self) -> &FuturePriceBuffer {
        &self.state.future_prices
    }

    pub fn recompute_forecast(&mut self) {
        self.state.recompute_forecast(&mut self.rng);
    }

    /// Players and funds by net worth, richest first
    pub fn standings(&self) -> Vec<Standing> {
        let view = self.state.view();
        let mut rows: Vec<Standing> = self
            .state
            .players
            .iter()
            .map(|p| Standing {
                name: p.name.clone(),
                net_worth: p.net_worth(view),
                is_npc: false,
            })
            .chain(self.state.hedge_funds.iter().map(|f| Standing {
                name: f.name().to_string(),
                net_worth: f.account.net_worth(view),
                is_npc: f.is_npc,
            }))
            .collect();
        rows.sort_by(|a, b| b.net_worth.partial_cmp(&a.net_worth).unwrap_or(Ordering::Equal));
        rows
    }

    // ------------------------------------------------------------------
    // Weekly flow
    // ------------------------------------------------------------------

    /// Book weekly charges, run breaking news and print the gazettes
    pub fn open_week(&mut self) -> Result<WeekOpening> {
        staged(&mut self.state, &mut self.rng, week::open)
    }

    /// Move the market to the next week
    ///
    /// Either the whole advance is applied or, on error, nothing is.
    pub fn advance_week(&mut self) -> Result<WeekReport> {
        let model = &self.model;
        let lender = &self.config.mystical_lender;
        staged(&mut self.state, &mut self.rng, |state, rng| {
            week::advance(state, model, lender, rng)
        })
    }

    // ------------------------------------------------------------------
    // Player operations
    // ------------------------------------------------------------------

    fn with_desk<T>(
        &mut self,
        player: &str,
        trade: impl FnOnce(&mut TradeDesk<'_>, &mut Player) -> Result<T>,
    ) -> Result<T> {
        let GameState {
            companies,
            themed,
            future_prices,
            players,
            ..
        } = &mut self.state;
        let account = players
            .iter_mut()
            .find(|p| p.name == player)
            .ok_or_else(|| EngineError::UnknownPlayer(player.to_string()))?;
        let mut desk = TradeDesk {
            companies,
            themed,
            forecast: future_prices,
            model: &self.model,
            lender: &self.config.mystical_lender,
        };
        trade(&mut desk, account)
    }

    pub fn buy_stock(&mut self, player: &str, company: &str, dollars: f64, leverage: f64) -> Result<Fill> {
        self.with_desk(player, |desk, account| desk.buy(account, company, dollars, leverage))
    }

    pub fn sell_stock(&mut self, player: &str, company: &str, amount: SellAmount) -> Result<Fill> {
        self.with_desk(player, |desk, account| desk.sell(account, company, amount))
    }

    pub fn short_sell(&mut self, player: &str, company: &str, shares: u64) -> Result<Fill> {
        self.with_desk(player, |desk, account| desk.short(account, company, shares))
    }

    pub fn cover_short(&mut self, player: &str, company: &str, shares: u64) -> Result<Fill> {
        self.with_desk(player, |desk, account| desk.cover(account, company, shares))
    }

    pub fn borrow(&mut self, player: &str, amount: f64) -> Result<()> {
        self.with_desk(player, |desk, account| desk.borrow(account, amount))
    }

    pub fn repay(&mut self, player: &str, amount: f64) -> Result<f64> {
        Ok(self.state.player_mut(player)?.repay(amount)?)
    }

    pub fn accept_mystical_lender(&mut self, player: &str) -> Result<f64> {
        let lender = self.config.mystical_lender;
        Ok(self.state.player_mut(player)?.accept_mystical_lender(&lender)?)
    }

    /// Repay `amount`, or everything owed when `None`
    pub fn repay_mystical_lender(&mut self, player: &str, amount: Option<f64>) -> Result<f64> {
        Ok(self.state.player_mut(player)?.repay_mystical_lender(amount)?)
    }

    pub fn buy_treasury(&mut self, player: &str, bonds: u64) -> Result<f64> {
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.buy_treasury(&themed.treasury, bonds)?)
    }

    pub fn sell_treasury(&mut self, player: &str, bonds: u64) -> Result<f64> {
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.sell_treasury(&themed.treasury, bonds)?)
    }

    pub fn buy_quantum_singularity(&mut self, player: &str, units: u64) -> Result<f64> {
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.buy_quantum_singularity(&themed.quantum_singularity, units)?)
    }

    pub fn buy_themed(&mut self, player: &str, asset: ThemedAsset, units: u64) -> Result<ThemedFill> {
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.buy_themed(asset, units, themed)?)
    }

    pub fn sell_themed(&mut self, player: &str, asset: ThemedAsset, units: u64) -> Result<ThemedFill> {
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.sell_themed(asset, units, themed)?)
    }

    pub fn buy_void_catalyst(&mut self, player: &str) -> Result<CatalystPurchase> {
        let humans = self.state.human_names();
        let GameState { players, themed, .. } = &mut self.state;
        let account = find(players, player)?;
        Ok(account.buy_void_catalyst(&mut themed.void_catalyst, &humans, &mut self.rng)?)
    }

    /// This week's research hint on `company`
    ///
    /// Human players also get a read on next week's lookahead price.
    pub fn research(&mut self, player: &str, company: &str) -> Result<String> {
        if self.state.player(player)?.researched_this_week {
            return Err(EngineError::AlreadyResearched(player.to_string()));
        }
        let target = self.state.company(company)?;
        let future = self.state.future_prices.next_price(company);
        let hint = research_hint(target, future, &mut self.rng);
        self.state.player_mut(player)?.record_research(company, hint.clone());
        Ok(hint)
    }
}

fn find<'a>(players: &'a mut [Player], name: &str) -> Result<&'a mut Player> {
    players
        .iter_mut()
        .find(|p| p.name == name)
        .ok_or_else(|| EngineError::UnknownPlayer(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn market() -> Market {
        Market::new(EngineConfig::quiet(7), &["Ada".to_string(), "Grace".to_string()]).unwrap()
    }

    #[test]
    fn test_trade_moves_price_and_lookahead_together() {
        let mut market = market();
        let before = market.company("TechCorp").unwrap().price();
        let window_before = market.future_prices().get("TechCorp").unwrap().to_vec();

        let fill = market.buy_stock("Ada", "TechCorp", 20_000.0, 1.0).unwrap();
        let after = market.company("TechCorp").unwrap().price();
        assert!(after >= before);
        assert_relative_eq!(after / before, fill.price_factor, epsilon = 1e-12);

        let window_after = market.future_prices().get("TechCorp").unwrap();
        for (old, new) in window_before.iter().zip(window_after) {
            assert_relative_eq!(new / old, after / before, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_rejection_leaves_account_untouched() {
        let mut market = market();
        let err = market.buy_stock("Ada", "TechCorp", 60_000.0, 1.0).unwrap_err();
        assert!(matches!(err, EngineError::Rejected(_)));
        assert_eq!(market.player("Ada").unwrap().cash, 50_000.0);
        assert!(matches!(
            market.buy_stock("Nobody", "TechCorp", 10.0, 1.0),
            Err(EngineError::UnknownPlayer(_))
        ));
        assert!(matches!(
            market.buy_stock("Ada", "Nope", 10.0, 1.0),
            Err(EngineError::UnknownCompany(_))
        ));
    }

    #[test]
    fn test_research_once_per_week() {
        let mut market = market();
        let hint = market.research("Ada", "PharmaCare").unwrap();
        assert!(!hint.is_empty());
        assert!(matches!(
            market.research("Ada", "TechCorp"),
            Err(EngineError::AlreadyResearched(_))
        ));
        assert_eq!(market.player("Ada").unwrap().research_history["PharmaCare"], vec![hint]);

        market.open_week().unwrap();
        assert!(market.research("Ada", "TechCorp").is_ok());
    }

    #[test]
    fn test_open_week_only_once() {
        let mut market = market();
        market.open_week().unwrap();
        assert!(matches!(market.open_week(), Err(EngineError::WeekAlreadyOpened(1))));
        market.advance_week().unwrap();
        assert!(market.open_week().is_ok());
    }

    #[test]
    fn test_standings_sorted() {
        let mut market = Market::new(EngineConfig::seeded(3), &["Ada".to_string()]).unwrap();
        market.buy_treasury("Ada", 10).unwrap();
        let standings = market.standings();
        assert_eq!(standings.len(), 4);
        assert!(standings.windows(2).all(|w| w[0].net_worth >= w[1].net_worth));
        assert_eq!(standings.iter().filter(|s| s.is_npc).count(), 3);
    }

    #[test]
    fn test_bonds_and_loans() {
        let mut market = market();
        assert_relative_eq!(market.buy_treasury("Grace", 5).unwrap(), 500.0);
        market.borrow("Grace", 1_000.0).unwrap();
        assert_relative_eq!(market.repay("Grace", 400.0).unwrap(), 400.0);
        let grace = market.player("Grace").unwrap();
        assert_relative_eq!(grace.borrowed_amount, 600.0);
        assert_relative_eq!(grace.cash, 50_000.0 - 500.0 + 1_000.0 - 400.0);
        assert_eq!(grace.treasury_bonds, 5);
    }

    #[test]
    fn test_mystical_lender_debt_worsens_fills() {
        let mut normal = market();
        let mut indebted = market();
        assert_relative_eq!(indebted.accept_mystical_lender("Ada").unwrap(), 250_000.0);
        assert!(matches!(
            indebted.accept_mystical_lender("Ada"),
            Err(EngineError::Rejected(_))
        ));

        let price = normal.company("TechCorp").unwrap().price();
        let plain = normal.short_sell("Ada", "TechCorp", 50).unwrap();
        let costly = indebted.short_sell("Ada", "TechCorp", 50).unwrap();
        assert_relative_eq!(
            (price - costly.effective_price) / (price - plain.effective_price),
            5.0,
            max_relative = 1e-9
        );
        // The lender makes fills worse, not the market move
        assert_eq!(costly.price_factor, plain.price_factor);

        indebted.repay_mystical_lender("Ada", None).unwrap();
        let after = indebted.cover_short("Ada", "TechCorp", 10).unwrap();
        let reference = normal.cover_short("Ada", "TechCorp", 10).unwrap();
        assert_relative_eq!(after.effective_price, reference.effective_price, max_relative = 1e-12);
    }
}
