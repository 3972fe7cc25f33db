use crate::{
    board::Position,
    executor::{self, Execution},
    movegen::legal_moves,
    types::{Move, PieceKind},
};

/// Pure perft node count.
/// Counts all legal positions from the current one down to `depth`.
///
/// Promotions are completed as queens, so each promoting pawn move counts
/// as one node rather than four.
pub fn perft(pos: &Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let moves = legal_moves(pos, pos.side_to_move);
    if depth == 1 {
        return moves.len() as u64;
    }
    moves
        .iter()
        .filter_map(|&mv| play(pos, mv))
        .map(|next| perft(&next, depth - 1))
        .sum()
}

/// Per-move node counts at `depth`, in legal-move order.
pub fn divide(pos: &Position, depth: u8) -> Vec<(Move, u64)> {
    legal_moves(pos, pos.side_to_move)
        .into_iter()
        .filter_map(|mv| {
            let next = play(pos, mv)?;
            Some((mv, perft(&next, depth.saturating_sub(1))))
        })
        .collect()
}

fn play(pos: &Position, mv: Move) -> Option<Position> {
    let mut next = pos.clone();
    match executor::execute(&mut next, mv.from, mv.to).ok()? {
        Execution::Committed(_) => {}
        Execution::PendingPromotion(pending) => {
            executor::complete_promotion(&mut next, &pending, PieceKind::Queen).ok()?;
        }
    }
    Some(next)
}
