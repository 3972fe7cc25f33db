//! Move validation and enumeration.
//!
//! Legality is decided per candidate move: a per-kind pseudo-legal geometry
//! check, then a simulation on a scratch copy of the position to make sure the
//! mover's own king is not left attacked. Castling additionally re-runs that
//! simulation for every square the king stands on or crosses.

use crate::{board::Position, executor, types::*};

/// Whether moving the piece on `from` to `to` is legal in `pos`.
pub fn is_legal(pos: &Position, from: Square, to: Square) -> bool {
    let pc = match pos.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    // Kings are never captured; a position allowing it is already invalid.
    if pos
        .piece_at(to)
        .is_some_and(|target| target.color == pc.color || target.kind == PieceKind::King)
    {
        return false;
    }
    if !is_pseudo_legal(pos, from, to) {
        return false;
    }
    !leaves_king_in_check(pos, from, to, pc)
}

/// Movement geometry and occupancy rules only; ignores the mover's king safety
/// except for castling, whose path test is part of the move's definition.
pub fn is_pseudo_legal(pos: &Position, from: Square, to: Square) -> bool {
    let pc = match pos.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    if from == to {
        return false;
    }
    let (dr, df) = delta(from, to);
    match pc.kind {
        PieceKind::Pawn => pawn_move(pos, from, to, pc),
        PieceKind::Knight => is_knight_jump(dr, df),
        PieceKind::Bishop => is_diagonal(dr, df) && path_clear(pos, from, to),
        PieceKind::Rook => is_straight(dr, df) && path_clear(pos, from, to),
        PieceKind::Queen => (is_diagonal(dr, df) || is_straight(dr, df)) && path_clear(pos, from, to),
        PieceKind::King => {
            (dr.abs() <= 1 && df.abs() <= 1) || (dr == 0 && df.abs() == 2 && can_castle(pos, from, to))
        }
    }
}

/// Whether the piece on `from` attacks `target`.
///
/// Same geometry as move validation except that pawns only attack diagonally
/// and kings never "attack" by castling.
pub fn attacks(pos: &Position, from: Square, target: Square) -> bool {
    let pc = match pos.piece_at(from) {
        Some(p) => p,
        None => return false,
    };
    if from == target {
        return false;
    }
    let (dr, df) = delta(from, target);
    match pc.kind {
        PieceKind::Pawn => dr == pc.color.pawn_dir() && df.abs() == 1,
        PieceKind::Knight => is_knight_jump(dr, df),
        PieceKind::Bishop => is_diagonal(dr, df) && path_clear(pos, from, target),
        PieceKind::Rook => is_straight(dr, df) && path_clear(pos, from, target),
        PieceKind::Queen => {
            (is_diagonal(dr, df) || is_straight(dr, df)) && path_clear(pos, from, target)
        }
        PieceKind::King => dr.abs() <= 1 && df.abs() <= 1,
    }
}

/// Whether any piece of `by` attacks `target`. Scans all 64 squares.
pub fn is_square_attacked(pos: &Position, target: Square, by: Color) -> bool {
    Square::all().any(|sq| match pos.piece_at(sq) {
        Some(pc) if pc.color == by => attacks(pos, sq, target),
        _ => false,
    })
}

pub fn is_in_check(pos: &Position, c: Color) -> bool {
    is_square_attacked(pos, pos.king_square(c), c.opposite())
}

/// Castling legality for a king standing on `from` and moving to `to`.
///
/// Requires an unmoved king on its home square, an unmoved rook in the chosen
/// corner, the matching castling right, empty squares between king and rook,
/// and that the king is not attacked on its origin, on the square it crosses,
/// or on its destination.
pub fn can_castle(pos: &Position, from: Square, to: Square) -> bool {
    let king = match pos.piece_at(from) {
        Some(p) if p.kind == PieceKind::King && !p.has_moved => p,
        _ => return false,
    };
    let c = king.color;
    let home = c.home_rank();
    if from.rank() != home || from.file() != 4 || to.rank() != home {
        return false;
    }
    let side = match to.file() {
        6 => CastleSide::Kingside,
        2 => CastleSide::Queenside,
        _ => return false,
    };
    if !pos.castling.allows(c, side) {
        return false;
    }

    let rook_file = side.rook_file();
    match Square::new(home, rook_file).and_then(|sq| pos.piece_at(sq)) {
        Some(r) if r.kind == PieceKind::Rook && r.color == c && !r.has_moved => {}
        _ => return false,
    }

    let (lo, hi) = if rook_file < from.file() {
        (rook_file, from.file())
    } else {
        (from.file(), rook_file)
    };
    for file in lo + 1..hi {
        if Square::new(home, file).and_then(|sq| pos.piece_at(sq)).is_some() {
            return false;
        }
    }

    // Origin, crossed square and destination must all be safe.
    let step: i8 = if to.file() > from.file() { 1 } else { -1 };
    let mut sq = from;
    loop {
        let mut scratch = pos.clone();
        if sq != from {
            scratch.relocate(from, sq);
        }
        if scratch.in_check(c) {
            return false;
        }
        if sq == to {
            return true;
        }
        sq = match sq.offset(0, step) {
            Some(next) => next,
            None => return false,
        };
    }
}

/// All legal moves for `c`, in scan order of origin then destination.
pub fn legal_moves(pos: &Position, c: Color) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, _) in pos.pieces(c) {
        for to in Square::all() {
            if is_legal(pos, from, to) {
                out.push(Move::new(from, to));
            }
        }
    }
    out
}

/// Legal moves of the piece standing on `from`, whichever side it belongs to.
pub fn legal_moves_from(pos: &Position, from: Square) -> Vec<Move> {
    Square::all()
        .filter(|&to| is_legal(pos, from, to))
        .map(|to| Move::new(from, to))
        .collect()
}

/// Short-circuiting variant of `!legal_moves(pos, c).is_empty()`.
pub fn has_legal_move(pos: &Position, c: Color) -> bool {
    pos.pieces(c)
        .any(|(from, _)| Square::all().any(|to| is_legal(pos, from, to)))
}

pub fn is_checkmate(pos: &Position, c: Color) -> bool {
    is_in_check(pos, c) && !has_legal_move(pos, c)
}

pub fn is_stalemate(pos: &Position, c: Color) -> bool {
    !is_in_check(pos, c) && !has_legal_move(pos, c)
}

/// The enemy pawn an en-passant capture from `from` to `to` would remove.
pub(crate) fn en_passant_victim(pos: &Position, from: Square, to: Square, c: Color) -> Option<Square> {
    let victim = Square::new(from.rank(), to.file())?;
    match pos.piece_at(victim) {
        Some(pc) if pc.kind == PieceKind::Pawn && pc.color != c => Some(victim),
        _ => None,
    }
}

fn pawn_move(pos: &Position, from: Square, to: Square, pc: Piece) -> bool {
    let dir = pc.color.pawn_dir();
    let (dr, df) = delta(from, to);
    let target = pos.piece_at(to);

    if df == 0 {
        if dr == dir {
            return target.is_none();
        }
        if dr == 2 * dir && from.rank() == pc.color.pawn_start_rank() && !pc.has_moved {
            let mid_empty = from
                .offset(dir, 0)
                .is_some_and(|mid| pos.piece_at(mid).is_none());
            return mid_empty && target.is_none();
        }
        return false;
    }

    if df.abs() == 1 && dr == dir {
        if target.is_some() {
            // Own pieces were rejected before dispatch.
            return true;
        }
        return pos.en_passant == Some(to) && en_passant_victim(pos, from, to, pc.color).is_some();
    }
    false
}

fn leaves_king_in_check(pos: &Position, from: Square, to: Square, pc: Piece) -> bool {
    let mut scratch = pos.clone();
    executor::apply(&mut scratch, from, to, pc, None);
    scratch.in_check(pc.color)
}

/// Every square strictly between `from` and `to` is empty. Callers guarantee
/// the two squares share a rank, file or diagonal.
fn path_clear(pos: &Position, from: Square, to: Square) -> bool {
    let (dr, df) = delta(from, to);
    let step_r = dr.signum();
    let step_f = df.signum();
    let mut cur = from.offset(step_r, step_f);
    while let Some(sq) = cur {
        if sq == to {
            return true;
        }
        if pos.piece_at(sq).is_some() {
            return false;
        }
        cur = sq.offset(step_r, step_f);
    }
    false
}

fn delta(from: Square, to: Square) -> (i8, i8) {
    (
        to.rank() as i8 - from.rank() as i8,
        to.file() as i8 - from.file() as i8,
    )
}

fn is_knight_jump(dr: i8, df: i8) -> bool {
    matches!((dr.abs(), df.abs()), (1, 2) | (2, 1))
}

fn is_diagonal(dr: i8, df: i8) -> bool {
    dr != 0 && dr.abs() == df.abs()
}

fn is_straight(dr: i8, df: i8) -> bool {
    (dr == 0) != (df == 0)
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
