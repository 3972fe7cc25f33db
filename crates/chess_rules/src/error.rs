//! Error types for the rules engine.
//!
//! Every error is recoverable: a rejected operation leaves the game untouched.

use crate::{
    game::GameStatus,
    types::{Color, PieceKind, Square},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ChessError {
    /// The validator rejected the move.
    #[error("illegal move: {from} -> {to}")]
    IllegalMove { from: Square, to: Square },

    #[error("a pawn cannot promote to a {0}")]
    InvalidPromotionChoice(PieceKind),

    /// Any mutating call after the game reached a terminal state.
    #[error("game is already over: {0}")]
    OperationOnTerminalGame(GameStatus),

    /// A promotion on this square must be completed or cancelled first.
    #[error("promotion on {0} is waiting for a piece choice")]
    PromotionPending(Square),

    #[error("no promotion is pending on {0}")]
    NoPendingPromotion(Square),

    /// A side in check cannot pass the move.
    #[error("{0} is in check and cannot pass")]
    PassWhileInCheck(Color),

    #[error("invalid position: {0}")]
    InvalidPosition(String),

    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),
}

pub type Result<T> = std::result::Result<T, ChessError>;
