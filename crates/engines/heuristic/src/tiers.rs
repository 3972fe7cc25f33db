//! The three selection tiers as plain functions over an explicit RNG.

use chess_rules::{Move, Position, Square};
use rand::seq::SliceRandom;
use rand::Rng;

/// Bonus for landing on one of the four centre squares.
pub const CENTER_BONUS: f64 = 2.0;
/// Bonus for moving a piece that has not moved yet.
pub const DEVELOPMENT_BONUS: f64 = 1.0;
/// Weight applied to the value of a captured piece.
pub const CAPTURE_WEIGHT: f64 = 10.0;
/// Upper bound (exclusive) of the random tie-break noise.
pub const NOISE: f64 = 0.5;

/// Tier 1: any legal move, uniformly.
pub fn random_move<R: Rng + ?Sized>(legal: &[Move], rng: &mut R) -> Option<Move> {
    legal.choose(rng).copied()
}

/// Tier 2: a random capture when one exists, otherwise tier 1.
pub fn greedy_move<R: Rng + ?Sized>(pos: &Position, legal: &[Move], rng: &mut R) -> Option<Move> {
    let captures: Vec<Move> = legal
        .iter()
        .copied()
        .filter(|mv| pos.piece_at(mv.to).is_some())
        .collect();
    if captures.is_empty() {
        random_move(legal, rng)
    } else {
        random_move(&captures, rng)
    }
}

/// Tier 3: highest heuristic score. Earlier moves win exact ties.
pub fn scored_move<R: Rng + ?Sized>(pos: &Position, legal: &[Move], rng: &mut R) -> Option<Move> {
    let mut best: Option<(Move, f64)> = None;
    for &mv in legal {
        let score = score(pos, mv) + rng.gen_range(0.0..NOISE);
        match best {
            Some((_, top)) if score <= top => {}
            _ => best = Some((mv, score)),
        }
    }
    best.map(|(mv, _)| mv)
}

/// Deterministic part of the tier-3 score.
pub fn score(pos: &Position, mv: Move) -> f64 {
    let mut s = 0.0;
    if let Some(target) = pos.piece_at(mv.to) {
        s += CAPTURE_WEIGHT * f64::from(target.kind.value());
    }
    if is_center(mv.to) {
        s += CENTER_BONUS;
    }
    if pos.piece_at(mv.from).is_some_and(|pc| !pc.has_moved) {
        s += DEVELOPMENT_BONUS;
    }
    s
}

/// d4, e4, d5 or e5.
pub fn is_center(sq: Square) -> bool {
    (3..=4).contains(&sq.rank()) && (3..=4).contains(&sq.file())
}
