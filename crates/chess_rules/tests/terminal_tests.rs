//! Tests for terminal state detection
//!
//! - Checkmate patterns
//! - Stalemate
//! - Check that is not mate

use chess_rules::{Color, Game, GameStatus, MoveOutcome, Position, Square};

fn setup(side: Color, pieces: &[(&str, char)]) -> Game {
    Game::from_position(Position::from_symbols(side, pieces).unwrap())
}

fn sq(s: &str) -> Square {
    Square::from_coord(s).unwrap()
}

// =============================================================================
// Checkmate Tests
// =============================================================================

#[test]
fn test_back_rank_mate() {
    let game = setup(
        Color::White,
        &[("g1", 'K'), ("f2", 'P'), ("g2", 'P'), ("h2", 'P'), ("e1", 'r'), ("g8", 'k')],
    );
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::Black });
    assert!(game.legal_moves().is_empty());
}

#[test]
fn test_smothered_mate() {
    let game = setup(
        Color::Black,
        &[("h8", 'k'), ("g8", 'r'), ("g7", 'p'), ("h7", 'p'), ("f7", 'N'), ("a1", 'K')],
    );
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
}

#[test]
fn test_scholars_mate_through_game() {
    let mut game = Game::new();
    let moves = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("f1", "c4"),
        ("b8", "c6"),
        ("d1", "h5"),
        ("g8", "f6"),
        ("h5", "f7"),
    ];
    let mut last = None;
    for (from, to) in moves {
        match game.make_move(sq(from), sq(to)).unwrap() {
            MoveOutcome::Committed(r) => last = Some(r),
            other => panic!("{other:?}"),
        }
    }
    assert_eq!(last.map(|r| r.notation), Some("Qxf7#".to_string()));
    assert_eq!(game.status(), GameStatus::Checkmate { winner: Color::White });
    assert_eq!(game.captured().lost_by(Color::Black).len(), 1);
}

// =============================================================================
// Stalemate Tests
// =============================================================================

#[test]
fn test_stalemate_king_and_pawn_endgame() {
    // Black king on g8 boxed in by the pawn on g7 and the king on g6.
    let game = setup(Color::Black, &[("g8", 'k'), ("g7", 'P'), ("g6", 'K')]);
    assert_eq!(game.status(), GameStatus::Stalemate);
    assert!(game.is_game_over());
}

#[test]
fn test_stalemate_king_in_corner() {
    let game = setup(Color::Black, &[("a8", 'k'), ("c7", 'K'), ("b6", 'Q')]);
    assert_eq!(game.status(), GameStatus::Stalemate);
}

#[test]
fn test_same_pieces_white_to_move_is_not_stalemate() {
    let game = setup(Color::White, &[("a8", 'k'), ("c7", 'K'), ("b6", 'Q')]);
    assert_eq!(game.status(), GameStatus::InProgress { check: None });
}

// =============================================================================
// Check without mate
// =============================================================================

#[test]
fn test_check_with_escape() {
    let game = setup(Color::White, &[("e1", 'K'), ("e8", 'r'), ("a8", 'k')]);
    assert_eq!(game.status(), GameStatus::InProgress { check: Some(Color::White) });
    let moves = game.legal_moves();
    assert!(!moves.is_empty());
    assert!(moves.iter().all(|m| m.from == sq("e1") && m.to.file() != 4));
}

#[test]
fn test_block_resolves_check() {
    let game = setup(Color::White, &[("e1", 'K'), ("e8", 'r'), ("a8", 'k'), ("d2", 'B')]);
    let from_bishop: Vec<_> = game.legal_moves_from(sq("d2"));
    assert_eq!(from_bishop.len(), 1);
    assert_eq!(from_bishop[0].to, sq("e3"));
}
