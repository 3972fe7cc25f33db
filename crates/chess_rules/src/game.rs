//! Game state machine: owns the position, history and captured tallies, and
//! keeps the status in step with every commit, undo and redo.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::{debug, info};

use crate::{
    board::Position,
    captured::CapturedPieces,
    error::{ChessError, Result},
    executor::{self, Execution, MoveRecord, PendingPromotion},
    history::History,
    movegen,
    types::*,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    /// `check` names the side to move when it is in check.
    InProgress { check: Option<Color> },
    Checkmate { winner: Color },
    Stalemate,
    TimeExpired { winner: Color },
}

impl GameStatus {
    /// Status of `pos` for its side to move. Never yields `TimeExpired`.
    pub fn evaluate(pos: &Position) -> GameStatus {
        let side = pos.side_to_move;
        let check = pos.in_check(side);
        if movegen::has_legal_move(pos, side) {
            GameStatus::InProgress {
                check: check.then_some(side),
            }
        } else if check {
            GameStatus::Checkmate {
                winner: side.opposite(),
            }
        } else {
            GameStatus::Stalemate
        }
    }

    pub fn is_terminal(&self) -> bool {
        !matches!(self, GameStatus::InProgress { .. })
    }

    pub fn winner(&self) -> Option<Color> {
        match *self {
            GameStatus::Checkmate { winner } | GameStatus::TimeExpired { winner } => Some(winner),
            _ => None,
        }
    }
}

impl Default for GameStatus {
    fn default() -> Self {
        GameStatus::InProgress { check: None }
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::InProgress { check: None } => write!(f, "in progress"),
            GameStatus::InProgress { check: Some(c) } => write!(f, "{c} is in check"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {winner} wins"),
            GameStatus::Stalemate => write!(f, "stalemate"),
            GameStatus::TimeExpired { winner } => write!(f, "{} ran out of time, {winner} wins", winner.opposite()),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MoveOutcome {
    Committed(MoveRecord),
    /// The pawn move is legal but waits for `complete_promotion`.
    PromotionPending(Square),
}

#[derive(Clone, Debug)]
pub struct Game {
    pub(crate) position: Position,
    /// Position before the first recorded move; the undo floor.
    pub(crate) initial: Position,
    pub(crate) history: History,
    pub(crate) captured: CapturedPieces,
    pub(crate) status: GameStatus,
    pub(crate) pending: Option<PendingPromotion>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    pub fn new() -> Self {
        Self::from_position(Position::startpos())
    }

    /// Start from an arbitrary position, e.g. a test setup.
    pub fn from_position(position: Position) -> Self {
        let status = GameStatus::evaluate(&position);
        Game {
            initial: position.clone(),
            position,
            history: History::new(),
            captured: CapturedPieces::default(),
            status,
            pending: None,
        }
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn initial_position(&self) -> &Position {
        &self.initial
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_game_over(&self) -> bool {
        self.status.is_terminal()
    }

    pub fn side_to_move(&self) -> Color {
        self.position.side_to_move
    }

    /// Half-moves applied since the initial position.
    pub fn ply(&self) -> usize {
        self.history.applied()
    }

    /// Full-move counter, starting at 1 and bumped after each Black move.
    pub fn fullmove_number(&self) -> usize {
        let offset = match self.initial.side_to_move {
            Color::White => 0,
            Color::Black => 1,
        };
        (self.ply() + offset) / 2 + 1
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn captured(&self) -> &CapturedPieces {
        &self.captured
    }

    pub fn pending_promotion(&self) -> Option<PendingPromotion> {
        self.pending
    }

    /// Legal moves for the side to move; empty once the game is over.
    pub fn legal_moves(&self) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        movegen::legal_moves(&self.position, self.position.side_to_move)
    }

    pub fn legal_moves_from(&self, from: Square) -> Vec<Move> {
        if self.is_game_over() {
            return Vec::new();
        }
        movegen::legal_moves_from(&self.position, from)
    }

    /// Play `from -> to` for the side to move.
    pub fn make_move(&mut self, from: Square, to: Square) -> Result<MoveOutcome> {
        self.ensure_accepts_moves()?;
        let mover = self.position.piece_at(from);
        if mover.is_none_or(|pc| pc.color != self.position.side_to_move) {
            return Err(ChessError::IllegalMove { from, to });
        }

        match executor::execute(&mut self.position, from, to)? {
            Execution::Committed(record) => {
                self.commit(record.clone());
                Ok(MoveOutcome::Committed(record))
            }
            Execution::PendingPromotion(pending) => {
                debug!(from = %pending.from, to = %pending.to, "promotion pending");
                self.pending = Some(pending);
                Ok(MoveOutcome::PromotionPending(pending.square()))
            }
        }
    }

    /// Finish the pending promotion on `square` as `kind`.
    pub fn complete_promotion(&mut self, square: Square, kind: PieceKind) -> Result<MoveRecord> {
        if self.status.is_terminal() {
            return Err(ChessError::OperationOnTerminalGame(self.status));
        }
        let pending = match self.pending {
            Some(p) if p.square() == square => p,
            _ => return Err(ChessError::NoPendingPromotion(square)),
        };
        let record = executor::complete_promotion(&mut self.position, &pending, kind)?;
        self.pending = None;
        self.commit(record.clone());
        Ok(record)
    }

    /// Drop a pending promotion. The pawn never left its square.
    pub fn cancel_promotion(&mut self) -> Option<PendingPromotion> {
        let pending = self.pending.take();
        if let Some(p) = pending {
            debug!(square = %p.square(), "promotion cancelled");
        }
        pending
    }

    /// Pass: hand the move to the opponent without moving a piece. Refused
    /// while the side to move is in check.
    pub fn switch_turn(&mut self) -> Result<GameStatus> {
        self.ensure_accepts_moves()?;
        let side = self.position.side_to_move;
        if self.position.in_check(side) {
            return Err(ChessError::PassWhileInCheck(side));
        }
        self.position.side_to_move = self.position.side_to_move.opposite();
        self.position.en_passant = None;
        self.refresh_status();
        debug!(side = %self.position.side_to_move, "turn passed");
        Ok(self.status)
    }

    /// Back to the initial position with empty history and tallies.
    pub fn reset(&mut self) {
        *self = Self::from_position(self.initial.clone());
        debug!("game reset");
    }

    /// The clock ran out for `side`.
    pub fn report_time_expired(&mut self, side: Color) -> Result<GameStatus> {
        if self.status.is_terminal() {
            return Err(ChessError::OperationOnTerminalGame(self.status));
        }
        self.pending = None;
        self.status = GameStatus::TimeExpired {
            winner: side.opposite(),
        };
        info!(status = %self.status, "game over");
        Ok(self.status)
    }

    /// Step back one move. Returns `Ok(None)` when there is nothing to undo.
    ///
    /// Allowed after checkmate or stalemate; not after a time forfeit.
    pub fn undo(&mut self) -> Result<Option<MoveRecord>> {
        self.ensure_reviewable()?;
        let undone = match self.history.undo() {
            Some(r) => r.clone(),
            None => return Ok(None),
        };
        self.position = match self.history.current() {
            Some(prev) => prev.snapshot.clone(),
            None => self.initial.clone(),
        };
        if let Some(pc) = undone.captured {
            self.captured.remove_latest(pc);
        }
        self.refresh_status();
        debug!(notation = %undone.notation, ply = self.ply(), "undo");
        Ok(Some(undone))
    }

    /// Re-apply the next move of the redo branch.
    pub fn redo(&mut self) -> Result<Option<MoveRecord>> {
        self.ensure_reviewable()?;
        let redone = match self.history.redo() {
            Some(r) => r.clone(),
            None => return Ok(None),
        };
        self.position = redone.snapshot.clone();
        if let Some(pc) = redone.captured {
            self.captured.add(pc);
        }
        self.refresh_status();
        debug!(notation = %redone.notation, ply = self.ply(), "redo");
        Ok(Some(redone))
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn commit(&mut self, record: MoveRecord) {
        if let Some(pc) = record.captured {
            self.captured.add(pc);
        }
        debug!(
            notation = %record.notation,
            color = %record.color,
            ply = self.ply() + 1,
            "move committed"
        );
        self.history.record(record);
        self.refresh_status();
    }

    pub(crate) fn refresh_status(&mut self) {
        let before = self.status;
        self.status = GameStatus::evaluate(&self.position);
        if self.status.is_terminal() && self.status != before {
            info!(status = %self.status, ply = self.ply(), "game over");
        }
    }

    fn ensure_accepts_moves(&self) -> Result<()> {
        if self.status.is_terminal() {
            return Err(ChessError::OperationOnTerminalGame(self.status));
        }
        if let Some(p) = self.pending {
            return Err(ChessError::PromotionPending(p.square()));
        }
        Ok(())
    }

    fn ensure_reviewable(&self) -> Result<()> {
        if let GameStatus::TimeExpired { .. } = self.status {
            return Err(ChessError::OperationOnTerminalGame(self.status));
        }
        if let Some(p) = self.pending {
            return Err(ChessError::PromotionPending(p.square()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
