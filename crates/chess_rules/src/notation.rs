//! Short algebraic notation for history display.

use crate::{board::Position, movegen, types::*};

/// Describe `from -> to` as played in `pos`, without the check suffix.
///
/// Must be called before the move is applied: captures and disambiguation
/// are read off the current board.
pub fn describe(pos: &Position, from: Square, to: Square, promotion: Option<PieceKind>) -> String {
    let pc = match pos.piece_at(from) {
        Some(pc) => pc,
        None => return format!("{from}{to}"),
    };

    if pc.kind == PieceKind::King && from.file().abs_diff(to.file()) == 2 {
        return if to.file() > from.file() {
            "O-O".to_string()
        } else {
            "O-O-O".to_string()
        };
    }

    let is_capture =
        pos.piece_at(to).is_some() || (pc.kind == PieceKind::Pawn && from.file() != to.file());

    let mut san = String::new();
    match pc.kind.letter() {
        Some(letter) => {
            san.push(letter);
            san.push_str(&disambiguation(pos, from, to, pc));
        }
        None if is_capture => san.push(from.file_char()),
        None => {}
    }
    if is_capture {
        san.push('x');
    }
    san.push_str(&to.to_coord());

    if let Some(letter) = promotion.and_then(PieceKind::letter) {
        san.push('=');
        san.push(letter);
    }
    san
}

/// File, rank or both of `from` when another piece of the same kind and
/// colour could also legally reach `to`.
fn disambiguation(pos: &Position, from: Square, to: Square, pc: Piece) -> String {
    let rivals: Vec<Square> = pos
        .pieces(pc.color)
        .filter(|&(sq, other)| sq != from && other.kind == pc.kind)
        .filter(|&(sq, _)| movegen::is_legal(pos, sq, to))
        .map(|(sq, _)| sq)
        .collect();
    if rivals.is_empty() {
        return String::new();
    }
    if rivals.iter().all(|sq| sq.file() != from.file()) {
        return from.file_char().to_string();
    }
    if rivals.iter().all(|sq| sq.rank() != from.rank()) {
        return from.rank_char().to_string();
    }
    from.to_coord()
}
