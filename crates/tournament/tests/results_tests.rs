use heuristic_engine::{HeuristicEngine, Strategy};
use tournament::{ArenaConfig, ArenaResults, MatchRunner};

fn temp_path(name: &str) -> std::path::PathBuf {
    std::env::temp_dir().join(format!("arena-{}-{name}", std::process::id()))
}

fn small_match() -> ArenaResults {
    let config = ArenaConfig {
        games: 2,
        max_plies: 20,
        seed: Some(11),
        verbose: false,
        ..Default::default()
    };
    let mut engine1 = HeuristicEngine::seeded(Strategy::Scored, 11);
    let mut engine2 = HeuristicEngine::seeded(Strategy::Greedy, 12);
    let report = MatchRunner::new(config.match_config())
        .run_match(&mut engine1, &mut engine2)
        .unwrap();
    ArenaResults::new(
        "scored vs greedy",
        vec!["scored".into(), "greedy".into()],
        config,
        report,
    )
}

#[test]
fn results_survive_save_and_load() {
    let results = small_match();
    let path = temp_path("results.json");
    results.save(&path).unwrap();
    let loaded = ArenaResults::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(loaded, results);
}

#[test]
fn report_lists_every_game() {
    let results = small_match();
    let text = results.generate_report();
    assert!(text.starts_with("=== Match: scored vs greedy ==="));
    assert!(text.contains("Total: "));
    let rows = text.lines().filter(|l| l.starts_with("1 ") || l.starts_with("2 ")).count();
    assert_eq!(rows, 2);
}

#[test]
fn load_reports_missing_file() {
    let err = ArenaResults::load(&temp_path("does-not-exist.json")).unwrap_err();
    assert!(err.to_string().contains("failed to read"));
}

#[test]
fn config_file_round_trip() {
    let path = temp_path("arena.toml");
    std::fs::write(&path, "games = 3\nengine1 = \"easy\"\n").unwrap();
    let config = ArenaConfig::load(&path).unwrap();
    std::fs::remove_file(&path).ok();
    assert_eq!(config.games, 3);
    assert_eq!(config.engine1, "easy");
    assert_eq!(config.engine2, "random");
}
