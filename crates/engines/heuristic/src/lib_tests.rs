use super::*;
use chess_rules::{legal_moves, Color, Square};

fn sq(s: &str) -> Square {
    Square::from_coord(s).unwrap()
}

fn setup(side: Color, pieces: &[(&str, char)]) -> Position {
    Position::from_symbols(side, pieces).unwrap()
}

#[test]
fn every_tier_returns_legal_move() {
    let pos = Position::startpos();
    let legal = legal_moves(&pos, Color::White);
    for strategy in Strategy::ALL {
        let mut engine = HeuristicEngine::seeded(strategy, 7);
        let mv = engine.choose(&pos, &legal);
        assert!(mv.is_some_and(|m| legal.contains(&m)), "{strategy}");
    }
}

#[test]
fn every_tier_handles_no_moves() {
    let pos = setup(Color::Black, &[("a8", 'k'), ("c7", 'K'), ("b6", 'Q')]);
    let legal = legal_moves(&pos, Color::Black);
    assert!(legal.is_empty());
    for strategy in Strategy::ALL {
        let mut engine = HeuristicEngine::seeded(strategy, 1);
        assert_eq!(engine.choose(&pos, &legal), None);
    }
}

#[test]
fn greedy_always_takes_the_only_capture() {
    let pos = setup(Color::White, &[("e1", 'K'), ("e8", 'k'), ("a1", 'R'), ("a5", 'n')]);
    let legal = legal_moves(&pos, Color::White);
    for seed in 0..20 {
        let mut engine = HeuristicEngine::seeded(Strategy::Greedy, seed);
        assert_eq!(engine.choose(&pos, &legal), Some(Move::new(sq("a1"), sq("a5"))));
    }
}

#[test]
fn greedy_without_captures_is_random() {
    let pos = Position::startpos();
    let legal = legal_moves(&pos, Color::White);
    let mut rng = StdRng::seed_from_u64(3);
    let mv = tiers::greedy_move(&pos, &legal, &mut rng);
    assert!(mv.is_some_and(|m| legal.contains(&m)));
}

#[test]
fn scored_prefers_the_queen() {
    let pos = setup(
        Color::White,
        &[("e1", 'K'), ("h8", 'k'), ("c3", 'N'), ("d5", 'q'), ("a4", 'p')],
    );
    let legal = legal_moves(&pos, Color::White);
    for seed in 0..20 {
        let mut engine = HeuristicEngine::seeded(Strategy::Scored, seed);
        assert_eq!(engine.choose(&pos, &legal), Some(Move::new(sq("c3"), sq("d5"))));
    }
}

#[test]
fn score_components() {
    let pos = Position::startpos();
    assert_eq!(tiers::score(&pos, Move::new(sq("e2"), sq("e4"))), 3.0);
    assert_eq!(tiers::score(&pos, Move::new(sq("g1"), sq("f3"))), 1.0);
    assert!(tiers::is_center(sq("d5")));
    assert!(!tiers::is_center(sq("c4")));
}

#[test]
fn scored_opening_move_is_a_centre_push() {
    let pos = Position::startpos();
    let legal = legal_moves(&pos, Color::White);
    for seed in 0..10 {
        let mut engine = HeuristicEngine::seeded(Strategy::Scored, seed);
        let mv = engine.choose(&pos, &legal).unwrap();
        assert!(tiers::is_center(mv.to), "seed {seed} chose {mv}");
    }
}

#[test]
fn seeded_engines_repeat_themselves() {
    let pos = Position::startpos();
    let legal = legal_moves(&pos, Color::White);
    let mut a = HeuristicEngine::seeded(Strategy::Random, 42);
    let mut b = HeuristicEngine::seeded(Strategy::Random, 42);
    for _ in 0..10 {
        assert_eq!(a.choose(&pos, &legal), b.choose(&pos, &legal));
    }
}

#[test]
fn strategy_names_parse() {
    assert_eq!("random".parse::<Strategy>(), Ok(Strategy::Random));
    assert_eq!("EASY".parse::<Strategy>(), Ok(Strategy::Random));
    assert_eq!("medium".parse::<Strategy>(), Ok(Strategy::Greedy));
    assert_eq!(" hard ".parse::<Strategy>(), Ok(Strategy::Scored));
    assert!("minimax".parse::<Strategy>().is_err());
    for s in Strategy::ALL {
        assert_eq!(s.to_string().parse::<Strategy>(), Ok(s));
        assert_eq!(s.difficulty().parse::<Strategy>(), Ok(s));
    }
}

#[test]
fn engine_name_mentions_tier() {
    let engine = HeuristicEngine::seeded(Strategy::Greedy, 0);
    assert_eq!(engine.name(), "Heuristic (greedy)");
    assert_eq!(engine.strategy(), Strategy::Greedy);
}
