//! Applies validated moves to a position.
//!
//! `execute` is the only entry point that commits a move; it re-checks
//! legality so a stale caller cannot corrupt the position. Promotions are
//! split in two: `execute` reports the pending choice without touching the
//! position, `complete_promotion` commits with the chosen kind.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::{
    board::Position,
    error::{ChessError, Result},
    movegen, notation,
    types::*,
};

/// One committed move plus the position it produced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveRecord {
    pub from: Square,
    pub to: Square,
    pub moved_kind: PieceKind,
    pub color: Color,
    pub captured: Option<Piece>,
    pub notation: String,
    pub special: Option<SpecialMove>,
    /// Position immediately after the move, side to move already flipped.
    pub snapshot: Position,
}

/// A pawn move to the last rank that still needs a piece choice.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: Square,
    pub to: Square,
    pub color: Color,
}

impl PendingPromotion {
    pub fn square(&self) -> Square {
        self.to
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Execution {
    Committed(MoveRecord),
    PendingPromotion(PendingPromotion),
}

/// What `apply` did beyond moving one piece.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Applied {
    pub captured: Option<Piece>,
    pub special: Option<SpecialMove>,
}

/// Validate and commit `from -> to`. On error `pos` is untouched.
pub fn execute(pos: &mut Position, from: Square, to: Square) -> Result<Execution> {
    if !movegen::is_legal(pos, from, to) {
        return Err(ChessError::IllegalMove { from, to });
    }
    if is_promotion(pos, from, to) {
        return begin_promotion(pos, from, to).map(Execution::PendingPromotion);
    }
    commit(pos, from, to, None).map(Execution::Committed)
}

/// Whether `from -> to` is a pawn reaching its last rank.
pub fn is_promotion(pos: &Position, from: Square, to: Square) -> bool {
    pos.piece_at(from)
        .is_some_and(|pc| pc.kind == PieceKind::Pawn && to.rank() == pc.color.promotion_rank())
}

/// Check a promotion move without committing it.
pub fn begin_promotion(pos: &Position, from: Square, to: Square) -> Result<PendingPromotion> {
    let pc = match pos.piece_at(from) {
        Some(pc) if is_promotion(pos, from, to) && movegen::is_legal(pos, from, to) => pc,
        _ => return Err(ChessError::IllegalMove { from, to }),
    };
    Ok(PendingPromotion {
        from,
        to,
        color: pc.color,
    })
}

/// Commit a pending promotion as `kind`. Rejects kings and pawns as choices.
pub fn complete_promotion(
    pos: &mut Position,
    pending: &PendingPromotion,
    kind: PieceKind,
) -> Result<MoveRecord> {
    if !kind.is_promotion_choice() {
        return Err(ChessError::InvalidPromotionChoice(kind));
    }
    // Re-derive from the position in case it changed since the request.
    begin_promotion(pos, pending.from, pending.to)?;
    commit(pos, pending.from, pending.to, Some(kind))
}

fn commit(
    pos: &mut Position,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> Result<MoveRecord> {
    let mover = pos
        .piece_at(from)
        .ok_or(ChessError::IllegalMove { from, to })?;
    let mut text = notation::describe(pos, from, to, promotion);

    let applied = apply(pos, from, to, mover, promotion);

    let opponent = mover.color.opposite();
    if pos.in_check(opponent) {
        text.push(if movegen::has_legal_move(pos, opponent) {
            '+'
        } else {
            '#'
        });
    }
    trace!(%from, %to, notation = %text, "move applied");

    Ok(MoveRecord {
        from,
        to,
        moved_kind: mover.kind,
        color: mover.color,
        captured: applied.captured,
        notation: text,
        special: applied.special,
        snapshot: pos.clone(),
    })
}

/// Unchecked board update shared by commits and legality simulation.
///
/// Handles en-passant removal, the castling rook hop, promotion, the
/// en-passant target, castling-right revocation and the side-to-move flip.
pub(crate) fn apply(
    pos: &mut Position,
    from: Square,
    to: Square,
    mover: Piece,
    promotion: Option<PieceKind>,
) -> Applied {
    let color = mover.color;
    let mut captured = pos.piece_at(to);
    let mut special = None;

    if mover.kind == PieceKind::Pawn && captured.is_none() && from.file() != to.file() {
        if let Some(victim) = movegen::en_passant_victim(pos, from, to, color) {
            captured = pos.piece_at(victim);
            pos.set_piece(victim, None);
            special = Some(SpecialMove::EnPassant {
                captured_square: victim,
            });
        }
    }

    if mover.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
        let (rook_file, rook_dest) = if to.file() > from.file() {
            (CastleSide::Kingside.rook_file(), to.file() - 1)
        } else {
            (CastleSide::Queenside.rook_file(), to.file() + 1)
        };
        let squares = Square::new(from.rank(), rook_file).zip(Square::new(from.rank(), rook_dest));
        if let Some((rook_from, rook_to)) = squares {
            if let Some(mut rook) = pos.piece_at(rook_from) {
                rook.has_moved = true;
                pos.set_piece(rook_from, None);
                pos.set_piece(rook_to, Some(rook));
                special = Some(SpecialMove::Castling { rook_from, rook_to });
            }
        }
    }

    let mut moved = mover;
    moved.has_moved = true;
    if let Some(kind) = promotion {
        moved.kind = kind;
        special = Some(SpecialMove::Promotion { kind });
    }
    pos.set_piece(from, None);
    pos.set_piece(to, Some(moved));

    pos.en_passant = None;
    if mover.kind == PieceKind::Pawn && from.rank().abs_diff(to.rank()) == 2 {
        pos.en_passant = Square::new((from.rank() + to.rank()) / 2, from.file());
    }

    match mover.kind {
        PieceKind::King => pos.castling.revoke_all(color),
        PieceKind::Rook => revoke_corner(pos, color, from),
        _ => {}
    }
    if let Some(cp) = captured {
        if cp.kind == PieceKind::Rook {
            revoke_corner(pos, cp.color, to);
        }
    }

    pos.side_to_move = color.opposite();
    Applied { captured, special }
}

/// A rook leaving or being taken on its corner costs that side the right.
fn revoke_corner(pos: &mut Position, c: Color, sq: Square) {
    if sq.rank() != c.home_rank() {
        return;
    }
    for side in [CastleSide::Kingside, CastleSide::Queenside] {
        if sq.file() == side.rook_file() {
            pos.castling.revoke(c, side);
        }
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod executor_tests;
