use approx::assert_relative_eq;
use bourse_core::Sentiment;
use bourse_engine::{EngineConfig, EngineError, LOOKAHEAD_WEEKS, Market};
use bourse_news::{CompanyEvent, EventType, HOAX_MESSAGE_SUFFIX, NewsConfig, PendingNewsImpact};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn players() -> Vec<String> {
    vec!["Ada".to_string(), "Grace".to_string()]
}

/// Quiet market with TechCorp pinned flat at $100
fn flat_techcorp(seed: u64) -> Market {
    let mut market = Market::new(EngineConfig::quiet(seed), &players()).unwrap();
    let tech = market.state_mut().companies.get_mut("TechCorp").unwrap();
    tech.set_price(100.0);
    tech.fundamental_price = 100.0;
    tech.base_volatility = 0.0;
    market.recompute_forecast();
    market
}

#[test]
fn test_delayed_impact_lands_once() {
    init_logging();
    let mut market = flat_techcorp(1);
    market
        .state_mut()
        .breaking_news
        .pending_impacts_mut()
        .push(PendingNewsImpact::new("TechCorp", Sentiment::Negative, -15.0, 2));
    market.recompute_forecast();

    let report = market.advance_week().unwrap();
    assert!(report.resolved.is_empty());
    assert_relative_eq!(market.company("TechCorp").unwrap().price(), 100.0, epsilon = 1e-9);

    let report = market.advance_week().unwrap();
    assert_eq!(report.week, 3);
    assert_relative_eq!(market.company("TechCorp").unwrap().price(), 85.0, epsilon = 1e-9);
    assert_eq!(report.resolved.len(), 1);
    assert_eq!(
        report.movement_messages(),
        vec!["MARKET IMPACT: TechCorp drops 15.0% following recent negative news!".to_string()]
    );
    assert!(market.state().breaking_news.pending_impacts().is_empty());

    // The following week only mean-reverts
    market.advance_week().unwrap();
    assert_relative_eq!(
        market.company("TechCorp").unwrap().price(),
        85.0 + 15.0 * 0.3,
        epsilon = 1e-9
    );
}

#[test]
fn test_same_week_impacts_compound() {
    let mut market = flat_techcorp(2);
    for magnitude in [-13.3, 14.3, -13.7] {
        let sentiment = if magnitude > 0.0 {
            Sentiment::Positive
        } else {
            Sentiment::Negative
        };
        market
            .state_mut()
            .breaking_news
            .pending_impacts_mut()
            .push(PendingNewsImpact::new("TechCorp", sentiment, magnitude, 1));
    }
    market.recompute_forecast();

    let report = market.advance_week().unwrap();
    assert_eq!(report.resolved.len(), 3);
    let expected = 100.0 * (1.0 - 0.133) * (1.0 + 0.143) * (1.0 - 0.137);
    assert!((market.company("TechCorp").unwrap().price() - expected).abs() < 0.01);
}

#[test]
fn test_lookahead_front_becomes_live_price() {
    let mut market = Market::new(EngineConfig::quiet(3), &players()).unwrap();
    for _ in 0..5 {
        market.open_week().unwrap();
        let expected: Vec<(String, f64)> = market
            .future_prices()
            .iter()
            .map(|(name, window)| (name.to_string(), window[0]))
            .collect();

        market.advance_week().unwrap();
        for (name, price) in expected {
            assert_eq!(market.company(&name).unwrap().price(), price, "{name}");
        }
        assert!(market.future_prices().iter().all(|(_, w)| w.len() == LOOKAHEAD_WEEKS));
    }
}

#[test]
fn test_failed_advance_leaves_game_untouched() {
    let mut market = Market::new(EngineConfig::seeded(4), &players()).unwrap();
    market.open_week().unwrap();
    market
        .state_mut()
        .breaking_news
        .pending_impacts_mut()
        .push(PendingNewsImpact::new("Ghost Corp", Sentiment::Positive, 5.0, 1));
    let before = serde_json::to_value(market.state()).unwrap();

    let err = market.advance_week().unwrap_err();
    assert!(matches!(err, EngineError::CorruptState(_)));
    assert_eq!(serde_json::to_value(market.state()).unwrap(), before);
    assert_eq!(market.week(), 1);
}

#[test]
fn test_same_seed_same_market() {
    let run = |seed: u64| {
        let mut market = Market::new(EngineConfig::seeded(seed), &players()).unwrap();
        for _ in 0..8 {
            market.open_week().unwrap();
            market.advance_week().unwrap();
        }
        let histories: Vec<Vec<f64>> = market
            .companies()
            .values()
            .map(|c| c.price_history.clone())
            .collect();
        let worths: Vec<f64> = market.standings().iter().map(|s| s.net_worth).collect();
        (histories, worths)
    };
    assert_eq!(run(99), run(99));
}

#[test]
fn test_void_catalyst_sells_itself_after_four_weeks() {
    let mut market = Market::new(EngineConfig::quiet(5), &players()).unwrap();
    let humans = players();
    {
        let state = market.state_mut();
        state.themed.void_catalyst.claim("Ada", &humans).unwrap();
        state.player_mut("Ada").unwrap().void_catalyst_owned = true;
    }

    for _ in 0..3 {
        let report = market.advance_week().unwrap();
        assert!(report.catalyst_sales.is_empty());
    }
    let cash_before = market.player("Ada").unwrap().cash;
    let report = market.advance_week().unwrap();
    assert_eq!(report.catalyst_sales.len(), 1);
    let (owner, price) = &report.catalyst_sales[0];
    assert_eq!(owner, "Ada");
    assert!(*price > 100_000.0);

    let ada = market.player("Ada").unwrap();
    assert_relative_eq!(ada.cash, cash_before + price, epsilon = 1e-6);
    assert!(!ada.void_catalyst_owned);
    assert!(!market.state().themed.void_catalyst.is_owned);
}

#[test]
fn test_hedge_funds_trade_through_the_market() {
    init_logging();
    let config = EngineConfig {
        news: NewsConfig::disabled(),
        ..EngineConfig::seeded(6)
    };
    let mut market = Market::new(config, &players()).unwrap();
    let mut fills = 0;
    for _ in 0..6 {
        market.open_week().unwrap();
        let report = market.advance_week().unwrap();
        assert_eq!(report.fund_charges.len(), 3);
        fills += report.fund_activity.iter().filter(|a| a.fill.is_some()).count();
    }
    assert!(fills > 0);
    let apex = &market.hedge_funds()[0];
    assert!(!apex.account.portfolio.is_empty());
}

#[test]
fn test_weekly_charges_on_open() {
    let mut market = Market::new(EngineConfig::quiet(8), &players()).unwrap();
    market.borrow("Grace", 10_000.0).unwrap();
    let opening = market.open_week().unwrap();

    let grace = opening.charges.iter().find(|c| c.account == "Grace").unwrap();
    let rate = market.config().credit.interest_rate_weekly;
    assert_relative_eq!(grace.interest, 10_000.0 * rate / 100.0, epsilon = 1e-9);
    assert!(!grace.margin_call);
    assert_relative_eq!(
        market.player("Grace").unwrap().borrowed_amount,
        10_000.0 + grace.interest,
        epsilon = 1e-9
    );
}

/// TechCorp flat at $100 with one private event about to go public
fn scheduled_story(seed: u64, event_type: EventType, real_probability: f64) -> Market {
    let config = EngineConfig {
        news: NewsConfig {
            event_probability: 0.0,
            real_probability,
            market_movement_interval: 0,
            ..Default::default()
        },
        hedge_funds: false,
        ..EngineConfig::seeded(seed)
    };
    let mut market = Market::new(config, &players()).unwrap();
    let tech = market.state_mut().companies.get_mut("TechCorp").unwrap();
    tech.set_price(100.0);
    tech.fundamental_price = 100.0;
    tech.base_volatility = 0.0;
    let industry = tech.industry.clone();
    market.state_mut().breaking_news.add_event(
        "TechCorp",
        CompanyEvent {
            event_type,
            severity: 0.8,
            discovery_week: 1,
            weeks_until_public: 1,
            industry,
        },
    );
    market.recompute_forecast();
    market
}

/// Advance until the only pending impact lands; returns the live price the week before
fn advance_until_resolved(market: &mut Market) -> f64 {
    loop {
        let before = market.company("TechCorp").unwrap().price();
        let report = market.advance_week().unwrap();
        if !report.resolved.is_empty() {
            assert_eq!(report.resolved.len(), 1);
            return before;
        }
    }
}

#[test]
fn test_published_news_lands_in_two_stages() {
    init_logging();
    let mut market = scheduled_story(21, EventType::Scandal, 1.0);
    let opening = market.open_week().unwrap();
    assert_eq!(opening.news.published.len(), 1);
    let news = &opening.news.published[0];
    assert!(news.magnitude < 0.0);

    // 20% straight away
    let instant = market.company("TechCorp").unwrap().price();
    assert_relative_eq!(instant, 100.0 * (1.0 + news.magnitude * 0.2 / 100.0), epsilon = 1e-9);
    assert_eq!(instant, news.instant_price);

    // The other 80% once, on the due week
    let before = advance_until_resolved(&mut market);
    let landed = market.company("TechCorp").unwrap().price();
    assert_relative_eq!(landed, before * (1.0 + news.magnitude * 0.8 / 100.0), max_relative = 1e-12);
    assert!(market.state().breaking_news.pending_impacts().is_empty());

    // Afterwards only mean reversion
    market.advance_week().unwrap();
    let next = market.company("TechCorp").unwrap().price();
    assert_relative_eq!(next, landed + (100.0 - landed) * 0.3, epsilon = 1e-9);
}

#[test]
fn test_hoax_reverses_against_its_story() {
    for (seed, event_type) in [(22, EventType::Success), (23, EventType::Scandal)] {
        let mut market = scheduled_story(seed, event_type, 0.0);
        let opening = market.open_week().unwrap();
        let news = opening.news.published[0].clone();
        let hoax = market
            .state()
            .breaking_news
            .pending_impacts()
            .get(news.impact_id)
            .unwrap()
            .clone();
        assert!(!hoax.is_real);
        let reversal = hoax.hoax_reversal.unwrap();
        assert!((1.0..=3.0).contains(&reversal));

        let before = advance_until_resolved(&mut market);
        let after = market.company("TechCorp").unwrap().price();
        let expected = before * (1.0 - news.sentiment.sign() * reversal / 100.0);
        assert_relative_eq!(after, expected, max_relative = 1e-12);
        if event_type == EventType::Success {
            assert!(after < before);
        } else {
            assert!(after > before);
        }
    }
}

#[test]
fn test_busy_news_keeps_buffer_and_ledger_consistent() {
    init_logging();
    let config = EngineConfig {
        news: NewsConfig {
            event_probability: 0.6,
            ..NewsConfig::high_frequency()
        },
        hedge_funds: false,
        ..EngineConfig::seeded(24)
    };
    let mut market = Market::new(config, &players()).unwrap();
    let (mut published, mut resolved, mut hoaxes, mut movements) = (0, 0, 0, 0);

    for _ in 0..60 {
        let opening = market.open_week().unwrap();
        published += opening.news.published.len();
        movements += opening.news.published.iter().filter(|n| n.market_movement).count();

        let expected: Vec<(String, f64)> = market
            .future_prices()
            .iter()
            .map(|(name, window)| (name.to_string(), window[0]))
            .collect();
        let report = market.advance_week().unwrap();
        for (name, price) in expected {
            assert_eq!(market.company(&name).unwrap().price(), price, "{name}");
        }
        assert!(market.future_prices().iter().all(|(_, w)| w.len() == LOOKAHEAD_WEEKS));

        resolved += report.resolved.len();
        for impact in report.resolved.iter().filter(|i| !i.is_real) {
            hoaxes += 1;
            assert!(impact.resolution_message().ends_with(HOAX_MESSAGE_SUFFIX));
        }
    }

    let pending = market.state().breaking_news.pending_impacts().len();
    assert_eq!(published, resolved + pending);
    assert!(hoaxes > 0);
    // Weeks 12, 24, 36, 48 and 60
    assert_eq!(movements, 5);
}

#[test]
fn test_quarterly_market_movement() {
    let config = EngineConfig {
        news: NewsConfig {
            event_probability: 0.0,
            ..Default::default()
        },
        hedge_funds: false,
        ..EngineConfig::seeded(25)
    };
    let mut market = Market::new(config, &players()).unwrap();
    for _ in 0..11 {
        let opening = market.open_week().unwrap();
        assert!(opening.news.published.is_empty());
        market.advance_week().unwrap();
    }

    let opening = market.open_week().unwrap();
    assert_eq!(opening.week, 12);
    assert_eq!(opening.news.published.len(), 1);
    let movement = &opening.news.published[0];
    assert!(movement.market_movement);
    assert!((10.0..=20.0).contains(&movement.magnitude.abs()));
    let impact = market
        .state()
        .breaking_news
        .pending_impacts()
        .get(movement.impact_id)
        .unwrap();
    assert!(impact.is_real);
    assert!(impact.instant_impact_applied);
}
