//! Tournament CLI
//!
//! Run matches between selector tiers, or play and resume single games.

use anyhow::{bail, Context, Result};
use chess_rules::{Game, MoveSelector};
use heuristic_engine::{HeuristicEngine, Strategy};
use std::env;
use std::path::{Path, PathBuf};
use tournament::{format_move_list, ArenaConfig, ArenaResults, MatchRunner};
use tracing_subscriber::EnvFilter;

fn print_usage() {
    println!("Chess Arena");
    println!();
    println!("Usage:");
    println!("  tournament match <engine1> <engine2> [--games N] [--max-plies N] [--seed S]");
    println!("                   [--config arena.toml] [--results out.json]");
    println!("  tournament play <white> <black> [--max-plies N] [--seed S] [--save game.json]");
    println!("  tournament resume <game.json> [--white S] [--black S] [--seed S] [--save game.json]");
    println!();
    println!("Engines:");
    println!("  random | easy    - Uniform over legal moves");
    println!("  greedy | medium  - Captures first, otherwise random");
    println!("  scored | hard    - Material, centre and development heuristics");
    println!();
    println!("Examples:");
    println!("  tournament match scored greedy --games 20");
    println!("  tournament play hard easy --save game.json");
}

/// Flags shared by the subcommands. Later flags win over the config file.
#[derive(Debug, Default)]
struct Flags {
    positional: Vec<String>,
    games: Option<u32>,
    max_plies: Option<u32>,
    seed: Option<u64>,
    config: Option<PathBuf>,
    results: Option<PathBuf>,
    save: Option<PathBuf>,
    white: Option<String>,
    black: Option<String>,
}

fn parse_flags(args: &[String]) -> Result<Flags> {
    let mut flags = Flags::default();
    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        let next = args.get(i + 1).cloned();
        let value = || next.clone().with_context(|| format!("{arg} needs a value"));
        match arg {
            "--games" | "-g" => flags.games = Some(value()?.parse().context("--games")?),
            "--max-plies" => flags.max_plies = Some(value()?.parse().context("--max-plies")?),
            "--seed" => flags.seed = Some(value()?.parse().context("--seed")?),
            "--config" | "-c" => flags.config = Some(value()?.into()),
            "--results" => flags.results = Some(value()?.into()),
            "--save" => flags.save = Some(value()?.into()),
            "--white" => flags.white = Some(value()?),
            "--black" => flags.black = Some(value()?),
            other if other.starts_with("--") => bail!("unknown flag {other}"),
            other => {
                flags.positional.push(other.to_string());
                i += 1;
                continue;
            }
        }
        i += 2;
    }
    Ok(flags)
}

fn create_engine(spec: &str, seed: Option<u64>) -> Result<HeuristicEngine> {
    let strategy: Strategy = spec.parse()?;
    Ok(match seed {
        Some(s) => HeuristicEngine::seeded(strategy, s),
        None => HeuristicEngine::new(strategy),
    })
}

fn load_config(flags: &Flags) -> Result<ArenaConfig> {
    let mut config = match &flags.config {
        Some(path) => ArenaConfig::load(path)?,
        None => ArenaConfig::default(),
    };
    if let [engine1, engine2, ..] = flags.positional.as_slice() {
        config.engine1 = engine1.clone();
        config.engine2 = engine2.clone();
    }
    if let Some(games) = flags.games {
        config.games = games;
    }
    if let Some(max_plies) = flags.max_plies {
        config.max_plies = max_plies;
    }
    if flags.seed.is_some() {
        config.seed = flags.seed;
    }
    if flags.results.is_some() {
        config.results_path = flags.results.clone();
    }
    Ok(config)
}

fn run_match(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    if flags.positional.len() == 1 {
        bail!("match requires two engine specifications");
    }
    let config = load_config(&flags)?;

    println!("=== Match: {} vs {} ===", config.engine1, config.engine2);
    println!("Games: {}, Max plies: {}", config.games, config.max_plies);
    println!();

    let mut engine1 = create_engine(&config.engine1, config.seed)?;
    let mut engine2 = create_engine(&config.engine2, config.seed.map(|s| s.wrapping_add(1)))?;

    let runner = MatchRunner::new(config.match_config());
    let report = runner.run_match(&mut engine1, &mut engine2)?;

    let results = ArenaResults::new(
        &format!("{} vs {}", config.engine1, config.engine2),
        vec![engine1.name().to_string(), engine2.name().to_string()],
        config.clone(),
        report,
    );
    println!();
    results.print_report();

    if let Some(path) = &config.results_path {
        results.save(path)?;
        println!("Results written to {}", path.display());
    }
    Ok(())
}

fn run_play(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    let [white_spec, black_spec] = flags.positional.as_slice() else {
        bail!("play requires a white and a black engine");
    };
    let config = load_config(&flags)?;

    let mut white = create_engine(white_spec, config.seed)?;
    let mut black = create_engine(black_spec, config.seed.map(|s| s.wrapping_add(1)))?;
    let runner = MatchRunner::new(config.match_config());

    let mut game = Game::new();
    let report = runner.continue_game(&mut game, &mut white, &mut black)?;
    print_game(&game, &report.moves);
    if let Some(path) = &flags.save {
        save_game(&game, path)?;
    }
    Ok(())
}

fn run_resume(args: &[String]) -> Result<()> {
    let flags = parse_flags(args)?;
    let [path] = flags.positional.as_slice() else {
        bail!("resume requires a saved game");
    };
    let text = std::fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let (mut game, issues) = Game::load_json(&text);
    for issue in &issues {
        println!("Warning: {issue}");
    }
    println!("Resuming at ply {} ({})", game.ply(), game.status());

    let config = load_config(&flags)?;
    let white_spec = flags.white.clone().unwrap_or_else(|| config.engine1.clone());
    let black_spec = flags.black.clone().unwrap_or_else(|| config.engine2.clone());
    let mut white = create_engine(&white_spec, config.seed)?;
    let mut black = create_engine(&black_spec, config.seed.map(|s| s.wrapping_add(1)))?;
    let runner = MatchRunner::new(config.match_config());

    let report = runner.continue_game(&mut game, &mut white, &mut black)?;
    print_game(&game, &report.moves);
    let save_to = flags.save.clone().unwrap_or_else(|| PathBuf::from(path));
    save_game(&game, &save_to)
}

fn print_game(game: &Game, moves: &[String]) {
    println!(
        "{}",
        format_move_list(game.initial_position().side_to_move, moves)
    );
    println!();
    println!("{}", game.position());
    println!();
    println!("Result: {}", game.status());
}

fn save_game(game: &Game, path: &Path) -> Result<()> {
    let json = game.snapshot().to_json()?;
    std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    println!("Game saved to {}", path.display());
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    match args[1].as_str() {
        "match" => run_match(&args[2..]),
        "play" => run_play(&args[2..]),
        "resume" => run_resume(&args[2..]),
        "help" | "--help" | "-h" => {
            print_usage();
            Ok(())
        }
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            Ok(())
        }
    }
}
