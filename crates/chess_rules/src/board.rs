use serde::{Deserialize, Serialize};
use std::fmt;

use crate::{
    error::{ChessError, Result},
    movegen,
    types::*,
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The 8×8 grid, indexed `[rank][file]`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board(pub [[Option<Piece>; 8]; 8]);

impl Board {
    pub fn empty() -> Self {
        Board([[None; 8]; 8])
    }

    pub fn starting() -> Self {
        let mut b = Board::empty();
        for (f, &kind) in BACK_RANK.iter().enumerate() {
            b.0[0][f] = Some(Piece::new(Color::White, kind));
            b.0[1][f] = Some(Piece::new(Color::White, PieceKind::Pawn));
            b.0[6][f] = Some(Piece::new(Color::Black, PieceKind::Pawn));
            b.0[7][f] = Some(Piece::new(Color::Black, kind));
        }
        b
    }

    pub fn get(&self, sq: Square) -> Option<Piece> {
        self.0[sq.rank() as usize][sq.file() as usize]
    }

    pub fn set(&mut self, sq: Square, pc: Option<Piece>) {
        self.0[sq.rank() as usize][sq.file() as usize] = pc;
    }

    /// Squares holding a king of `color`, in scan order.
    pub fn kings(&self, color: Color) -> Vec<Square> {
        Square::all()
            .filter(|&sq| {
                self.get(sq)
                    .is_some_and(|pc| pc.color == color && pc.kind == PieceKind::King)
            })
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::starting()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideRights {
    pub kingside: bool,
    pub queenside: bool,
}

impl Default for SideRights {
    fn default() -> Self {
        Self {
            kingside: true,
            queenside: true,
        }
    }
}

/// Castling permissions. Flags only ever go from `true` to `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    #[serde(default)]
    pub white: SideRights,
    #[serde(default)]
    pub black: SideRights,
}

impl CastlingRights {
    pub fn none() -> Self {
        let off = SideRights {
            kingside: false,
            queenside: false,
        };
        Self {
            white: off,
            black: off,
        }
    }

    pub fn side(&self, c: Color) -> SideRights {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn allows(&self, c: Color, side: CastleSide) -> bool {
        let r = self.side(c);
        match side {
            CastleSide::Kingside => r.kingside,
            CastleSide::Queenside => r.queenside,
        }
    }

    pub fn revoke(&mut self, c: Color, side: CastleSide) {
        let r = match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        };
        match side {
            CastleSide::Kingside => r.kingside = false,
            CastleSide::Queenside => r.queenside = false,
        }
    }

    pub fn revoke_all(&mut self, c: Color) {
        self.revoke(c, CastleSide::Kingside);
        self.revoke(c, CastleSide::Queenside);
    }
}

/// Cached king locations for constant-time check lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KingSquares {
    pub white: Square,
    pub black: Square,
}

impl KingSquares {
    pub fn get(&self, c: Color) -> Square {
        match c {
            Color::White => self.white,
            Color::Black => self.black,
        }
    }

    pub fn set(&mut self, c: Color, sq: Square) {
        match c {
            Color::White => self.white = sq,
            Color::Black => self.black = sq,
        }
    }
}

impl Default for KingSquares {
    fn default() -> Self {
        Self {
            white: Square::E1,
            black: Square::E8,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    board: Board,
    pub side_to_move: Color,
    pub castling: CastlingRights,
    /// Square a pawn skipped on the previous ply.
    pub en_passant: Option<Square>,
    king_squares: KingSquares,
}

impl Position {
    pub fn startpos() -> Self {
        Position {
            board: Board::starting(),
            side_to_move: Color::White,
            castling: CastlingRights::default(),
            en_passant: None,
            king_squares: KingSquares::default(),
        }
    }

    /// Build a position from its parts, computing the king cache.
    ///
    /// Fails unless each side has exactly one king and the side that just
    /// moved is not left in check.
    pub fn from_parts(
        board: Board,
        side_to_move: Color,
        castling: CastlingRights,
        en_passant: Option<Square>,
    ) -> Result<Self> {
        let white = single_king(&board, Color::White)?;
        let black = single_king(&board, Color::Black)?;
        let pos = Position {
            board,
            side_to_move,
            castling,
            en_passant,
            king_squares: KingSquares { white, black },
        };
        let waiting = side_to_move.opposite();
        if pos.in_check(waiting) {
            return Err(ChessError::InvalidPosition(format!(
                "{waiting} is in check but {side_to_move} is to move"
            )));
        }
        Ok(pos)
    }

    /// Place pieces on an otherwise empty board. Castling rights start full;
    /// they still need unmoved kings and rooks on their home squares.
    pub fn from_pieces(
        side_to_move: Color,
        pieces: impl IntoIterator<Item = (Square, Piece)>,
    ) -> Result<Self> {
        let mut board = Board::empty();
        for (sq, pc) in pieces {
            board.set(sq, Some(pc));
        }
        Self::from_parts(board, side_to_move, CastlingRights::default(), None)
    }

    /// Like [`Position::from_pieces`] but from `("e1", 'K')` pairs.
    pub fn from_symbols(side_to_move: Color, placements: &[(&str, char)]) -> Result<Self> {
        let mut pieces = Vec::with_capacity(placements.len());
        for &(coord, symbol) in placements {
            let sq = Square::from_coord(coord)
                .ok_or_else(|| ChessError::InvalidPosition(format!("bad square `{coord}`")))?;
            let pc = Piece::from_symbol(symbol)
                .ok_or_else(|| ChessError::InvalidPosition(format!("bad piece symbol `{symbol}`")))?;
            pieces.push((sq, pc));
        }
        Self::from_pieces(side_to_move, pieces)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn king_squares(&self) -> KingSquares {
        self.king_squares
    }

    pub fn king_square(&self, c: Color) -> Square {
        self.king_squares.get(c)
    }

    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.get(sq)
    }

    /// Overwrite one square. Placing a king moves that side's cached king square.
    pub fn set_piece(&mut self, sq: Square, pc: Option<Piece>) {
        if let Some(p) = pc {
            if p.kind == PieceKind::King {
                self.king_squares.set(p.color, sq);
            }
        }
        self.board.set(sq, pc);
    }

    /// Move whatever stands on `from` to `to`, returning what was on `to`.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let moving = self.board.get(from);
        let captured = self.board.get(to);
        self.board.set(from, None);
        self.set_piece(to, moving);
        captured
    }

    /// Pieces of one side in scan order.
    pub fn pieces(&self, c: Color) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| match self.board.get(sq) {
            Some(pc) if pc.color == c => Some((sq, pc)),
            _ => None,
        })
    }

    pub fn in_check(&self, c: Color) -> bool {
        movegen::is_in_check(self, c)
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

fn single_king(board: &Board, c: Color) -> Result<Square> {
    match board.kings(c).as_slice() {
        [sq] => Ok(*sq),
        other => Err(ChessError::InvalidPosition(format!(
            "{c} has {} kings, expected exactly one",
            other.len()
        ))),
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8u8).rev() {
            write!(f, "{} ", rank + 1)?;
            for file in 0..8u8 {
                let ch = Square::new(rank, file)
                    .and_then(|sq| self.board.get(sq))
                    .map(Piece::symbol)
                    .unwrap_or('.');
                write!(f, "{ch}")?;
                if file < 7 {
                    write!(f, " ")?;
                }
            }
            writeln!(f)?;
        }
        writeln!(f, "  a b c d e f g h")?;
        write!(f, "{} to move", self.side_to_move)
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
