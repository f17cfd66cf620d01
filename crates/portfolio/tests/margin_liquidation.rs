use std::collections::BTreeMap;

use approx::assert_relative_eq;
use bourse_core::{Company, LiquidityTier, ThemedAssets};
use bourse_portfolio::{LiquidationAction, MarketView, Player};
use rand::SeedableRng;
use rand::rngs::StdRng;

fn companies(prices: &[(&str, f64)]) -> BTreeMap<String, Company> {
    let mut rng = StdRng::seed_from_u64(7);
    prices
        .iter()
        .map(|(name, price)| {
            let company =
                Company::new(*name, "Technology", *price, 6.0, LiquidityTier::Medium, 1e10, &mut rng);
            (name.to_string(), company)
        })
        .collect()
}

#[test]
fn test_liquidates_shorts_then_longs_then_bonds() {
    let companies = companies(&[("Big", 50.0), ("Small", 20.0), ("Held", 10.0), ("Tiny", 5.0)]);
    let themed = ThemedAssets::default();
    let view = MarketView::new(&companies, &themed);

    let mut player = Player::with_cash("Ann", 6_000.0);
    player.short_positions.insert("Small".into(), 100); // 2,000
    player.short_positions.insert("Big".into(), 80); // 4,000
    player.portfolio.insert("Held".into(), 500.0); // 5,000
    player.portfolio.insert("Tiny".into(), 2_000.0); // 10,000
    player.treasury_bonds = 30; // 3,000
    player.borrowed_amount = 40_000.0;
    assert!(player.check_margin_call(view));

    let liquidation = player.force_liquidate(view).unwrap();
    let kinds: Vec<&str> = liquidation
        .actions
        .iter()
        .map(|a| match a {
            LiquidationAction::CoveredShort { .. } => "cover",
            LiquidationAction::SoldLong { .. } => "sell",
            LiquidationAction::SoldBonds { .. } => "bonds",
            LiquidationAction::RepaidLoan { .. } => "repay",
        })
        .collect();
    assert_eq!(
        kinds,
        vec!["cover", "cover", "sell", "repay", "sell", "repay", "bonds", "repay"]
    );

    match &liquidation.actions[0] {
        LiquidationAction::CoveredShort { company, cost, .. } => {
            assert_eq!(company, "Big");
            assert_relative_eq!(*cost, 4_000.0, epsilon = 1e-6);
        }
        other => panic!("unexpected {other:?}"),
    }
    match &liquidation.actions[2] {
        LiquidationAction::SoldLong { company, .. } => assert_eq!(company, "Tiny"),
        other => panic!("unexpected {other:?}"),
    }

    assert!(player.short_positions.is_empty());
    assert!(player.portfolio.is_empty());
    assert_eq!(player.treasury_bonds, 0);
    // 6,000 - 6,000 + 15,000 + 3,000 = 18,000 repaid against 40,000
    assert_relative_eq!(player.borrowed_amount, 22_000.0, epsilon = 1e-6);
    assert_relative_eq!(liquidation.final_equity, -22_000.0, epsilon = 1e-6);
}

#[test]
fn test_liquidation_stops_once_resolved() {
    let companies = companies(&[("A", 10.0), ("B", 10.0)]);
    let themed = ThemedAssets::default();
    let view = MarketView::new(&companies, &themed);

    let mut player = Player::with_cash("Ann", 0.0);
    player.portfolio.insert("A".into(), 1_000.0); // 10,000
    player.portfolio.insert("B".into(), 500.0); // 5,000
    player.treasury_bonds = 10;
    player.borrowed_amount = 12_000.0;
    // equity 4,000 of 16,000 = 25%
    assert!(player.check_margin_call(view));

    let liquidation = player.force_liquidate(view).unwrap();
    assert!(liquidation.resolved);
    assert_eq!(liquidation.actions.len(), 2);
    assert!(player.portfolio.contains_key("B"));
    assert!(!player.portfolio.contains_key("A"));
    assert_eq!(player.treasury_bonds, 10);
    assert_relative_eq!(player.borrowed_amount, 2_000.0, epsilon = 1e-6);
    assert_relative_eq!(liquidation.final_equity, 4_000.0, epsilon = 1e-6);
}
