//! Opening and advancing a week
//!
//! Both steps run against a staged copy of the state (see
//! [`crate::Market`]); returning an error here leaves the live game as it was.

use std::collections::BTreeMap;

use bourse_core::{Company, ThemedAssets, Week};
use bourse_ports::ImpactModel;
use bourse_portfolio::{Fill, MarketView, MysticalLender, Player, SellAmount};
use bourse_strategy::{FundAction, StrategyContext};
use log::{debug, info, warn};
use rand::rngs::StdRng;

use crate::application::desk::TradeDesk;
use crate::application::reports::{AccountCharges, FundActivity, WeekOpening, WeekReport};
use crate::error::{EngineError, Result};
use crate::research::research_hint;
use crate::state::GameState;

/// Quantum Singularity pays out on weeks divisible by this
pub const QUANTUM_PAYOUT_INTERVAL: Week = 4;

/// Start-of-week bookkeeping, breaking news, market movements and the two gazettes
pub(crate) fn open(state: &mut GameState, rng: &mut StdRng) -> Result<WeekOpening> {
    let week = state.week_number;
    if state.week_opened {
        return Err(EngineError::WeekAlreadyOpened(week));
    }
    state.validate()?;

    let mut opening = WeekOpening {
        week,
        ..Default::default()
    };

    for player in &mut state.players {
        player.reset_weekly_research();
        let mut charges = book_charges(player, &state.companies, &state.themed, week);
        charges.margin_call = player.check_margin_call(MarketView::new(&state.companies, &state.themed));
        if charges.margin_call {
            warn!("Margin call alert for {} at week {week}", player.name);
        }
        opening.charges.push(charges);
    }

    let lookahead = &state.future_prices;
    let movement = state.breaking_news.publish_market_movement(
        week,
        &mut state.companies,
        |name| {
            lookahead
                .get(name)
                .filter(|window| !window.is_empty())
                .map(|window| window.iter().sum::<f64>() / window.len() as f64)
        },
        rng,
    )?;
    opening.news = state.breaking_news.run_week(week, &mut state.companies, rng)?;
    if let Some(movement) = movement {
        opening.news.published.insert(0, movement);
    }
    if !opening.news.published.is_empty() {
        // Instant moves changed the live prices the lookahead starts from
        state.recompute_forecast(rng);
    }

    opening.gazette = state.weekly_gazette.publish(&state.companies, week, rng);
    opening.chronicle = state.market_chronicle.publish(&state.companies, week, rng);
    state.week_opened = true;

    info!(
        "Week {week} opened: {} published, {} insider tip(s)",
        opening.news.published.len(),
        opening.news.insider_tips.len()
    );
    Ok(opening)
}

/// Move the market one week forward
pub(crate) fn advance(
    state: &mut GameState,
    model: &dyn ImpactModel,
    lender: &MysticalLender,
    rng: &mut StdRng,
) -> Result<WeekReport> {
    state.validate()?;
    state.week_number += 1;
    let week = state.week_number;
    let mut report = WeekReport {
        week,
        ..Default::default()
    };

    for player in &mut state.players {
        if let Some(liquidation) = player.force_liquidate(MarketView::new(&state.companies, &state.themed)) {
            warn!(
                "Margin call liquidated {} ({} action(s), resolved: {})",
                player.name,
                liquidation.actions.len(),
                liquidation.resolved
            );
            report.margin_calls.push((player.name.clone(), liquidation));
        }
    }

    run_hedge_funds(state, model, lender, rng, &mut report);

    if !state.future_prices.is_complete(&state.companies) {
        warn!("Lookahead incomplete before week {week}, recomputing");
        state.recompute_forecast(rng);
    }
    state.future_prices.apply_next(&mut state.companies);

    report.cycle_started = state.market_cycle.maybe_trigger(week, rng);
    report.cycle_ended = state.market_cycle.tick();

    // The delayed stage is already in the price just applied
    report.resolved = state.breaking_news.pending_impacts_mut().tick();

    state.themed.update_prices(&state.companies, rng);
    for player in &mut state.players {
        if let Some(price) = player.collect_void_catalyst(&mut state.themed.void_catalyst) {
            report.catalyst_sales.push((player.name.clone(), price));
        }
    }
    if let Some((owner, _)) = state.themed.void_catalyst.check_auto_sell() {
        warn!("Void Catalyst owner {owner} is not a player, releasing it");
    }

    if report.cycle_started.is_some() || report.cycle_ended.is_some() {
        state.recompute_forecast(rng);
    } else {
        state.future_prices.extend(
            &state.companies,
            state.breaking_news.pending_impacts(),
            state.market_cycle.active(),
            rng,
        );
    }
    state.week_opened = false;

    info!(
        "Advanced to week {week}: {} impact(s) resolved, {} fund action(s), {} margin call(s)",
        report.resolved.len(),
        report.fund_activity.len(),
        report.margin_calls.len()
    );
    Ok(report)
}

fn book_charges(
    account: &mut Player,
    companies: &BTreeMap<String, Company>,
    themed: &ThemedAssets,
    week: Week,
) -> AccountCharges {
    let interest = account.apply_interest();
    let short_fees = account.apply_short_borrow_fees(companies);
    let quantum_income = if week % QUANTUM_PAYOUT_INTERVAL == 0 {
        account.apply_quantum_income(&themed.quantum_singularity)
    } else {
        0.0
    };
    AccountCharges {
        account: account.name.clone(),
        interest,
        short_fees,
        quantum_income,
        margin_call: false,
    }
}

/// Funds react to the current market before it moves
fn run_hedge_funds(
    state: &mut GameState,
    model: &dyn ImpactModel,
    lender: &MysticalLender,
    rng: &mut StdRng,
    report: &mut WeekReport,
) {
    let cycle = state.market_cycle.kind();
    let week = state.week_number;
    let GameState {
        companies,
        themed,
        future_prices,
        hedge_funds,
        ..
    } = state;

    for fund in hedge_funds.iter_mut() {
        fund.account.reset_weekly_research();
        report
            .fund_charges
            .push(book_charges(&mut fund.account, companies, themed, week));

        let actions = {
            let ctx = StrategyContext {
                fund: &fund.account,
                market: MarketView::new(&*companies, &*themed),
                cycle,
            };
            fund.plan_week(&ctx, rng)
        };

        let mut desk = TradeDesk {
            companies: &mut *companies,
            themed: &*themed,
            forecast: &mut *future_prices,
            model,
            lender,
        };
        for action in actions {
            match execute(&mut desk, &mut fund.account, &action, rng) {
                Ok(fill) => report.fund_activity.push(FundActivity {
                    fund: fund.account.name.clone(),
                    action,
                    fill,
                }),
                Err(err) => debug!("{} skipped {:?}: {err}", fund.account.name, action),
            }
        }
    }
}

fn execute(
    desk: &mut TradeDesk<'_>,
    account: &mut Player,
    action: &FundAction,
    rng: &mut StdRng,
) -> Result<Option<Fill>> {
    match action {
        FundAction::Research { company } => {
            let hint = research_hint(desk.company(company)?, None, rng);
            account.record_research(company, hint);
            Ok(None)
        }
        FundAction::Borrow { amount } => {
            desk.borrow(account, *amount)?;
            Ok(None)
        }
        FundAction::Buy { company, dollars } => desk.buy(account, company, *dollars, 1.0).map(Some),
        FundAction::Sell { company, shares } => desk
            .sell(account, company, SellAmount::Shares(*shares))
            .map(Some),
        FundAction::Short { company, shares } => desk.short(account, company, *shares).map(Some),
        FundAction::Cover { company, shares } => desk.cover(account, company, *shares).map(Some),
        FundAction::BuyTreasury { bonds } => {
            account.buy_treasury(&desk.themed.treasury, *bonds)?;
            Ok(None)
        }
    }
}
