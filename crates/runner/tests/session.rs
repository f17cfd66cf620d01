//! Headless session tests
//!
//! Full week loops with autopilot seats, saving and resuming.

use bourse_engine::EngineConfig;
use bourse_runner::{RunnerError, Session, SessionConfig, load_engine_config};
use bourse_strategy::FundStyle;
use tempfile::tempdir;

fn config(seed: u64, weeks: u32) -> SessionConfig {
    SessionConfig {
        engine: EngineConfig::seeded(seed),
        players: vec!["Ada".to_string(), "Grace".to_string()],
        weeks,
        autopilot: FundStyle::Aggressive,
        ..Default::default()
    }
}

#[test]
fn test_session_plays_requested_weeks() {
    let _ = env_logger::builder().is_test(true).try_init();
    let mut session = Session::with_config(config(3, 6)).unwrap();
    let results = session.run().unwrap();

    assert_eq!(results.first_week, 1);
    assert_eq!(results.final_week, 7);
    assert_eq!(results.weeks_played, 6);
    // Two seats plus three funds
    assert_eq!(results.standings.len(), 5);
    assert!(results.seat_actions > 0);
    assert!(results.log.iter().any(|line| line == "=== Week 1 ==="));
    assert!(results.log.iter().any(|line| line == "--- Standings ---"));
    assert!(!session.market().state().week_opened);
}

#[test]
fn test_same_seed_same_session() {
    let run = |seed| {
        let mut session = Session::with_config(config(seed, 5)).unwrap();
        let results = session.run().unwrap();
        let worths: Vec<(String, f64)> = results
            .standings
            .into_iter()
            .map(|s| (s.name, s.net_worth))
            .collect();
        (worths, results.seat_actions, results.fund_trades)
    };
    assert_eq!(run(17), run(17));
}

#[test]
fn test_save_then_resume_continues_the_game() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut first = config(5, 3);
    first.save = Some(path.clone());
    Session::with_config(first).unwrap().run().unwrap();

    let mut second = config(5, 2);
    second.players = vec!["Someone Else".to_string()];
    second.resume = Some(path);
    let mut session = Session::with_config(second).unwrap();
    let results = session.run().unwrap();

    assert_eq!(results.first_week, 4);
    assert_eq!(results.final_week, 6);
    // Seats come from the save, not the config
    let names = session.market().state().human_names();
    assert_eq!(names, vec!["Ada".to_string(), "Grace".to_string()]);
}

#[test]
fn test_bad_setups_are_rejected() {
    let mut empty = config(1, 1);
    empty.players.clear();
    assert!(matches!(
        Session::with_config(empty),
        Err(RunnerError::InvalidSession(_))
    ));

    let mut twice = config(1, 1);
    twice.players = vec!["Ada".to_string(), "Ada".to_string()];
    assert!(matches!(Session::with_config(twice), Err(RunnerError::Engine(_))));

    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        load_engine_config(&missing),
        Err(RunnerError::ConfigRead { .. })
    ));
}

#[test]
fn test_partial_engine_config_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine.json");
    std::fs::write(
        &path,
        r#"{ "seed": 42, "starting_cash": 75000.0, "hedge_funds": false,
             "news": { "event_probability": 0.0 } }"#,
    )
    .unwrap();

    let engine = load_engine_config(&path).unwrap();
    assert_eq!(engine.seed, Some(42));
    assert_eq!(engine.starting_cash, 75_000.0);
    assert!(!engine.hedge_funds);
    assert_eq!(engine.news.event_probability, 0.0);

    let session = Session::with_config(SessionConfig {
        engine,
        players: vec!["Ada".to_string()],
        ..Default::default()
    })
    .unwrap();
    assert_eq!(session.market().player("Ada").unwrap().cash, 75_000.0);
    assert!(session.market().hedge_funds().is_empty());
}
