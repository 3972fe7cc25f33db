//! Linear move history with an undo/redo cursor.
//!
//! Records `[0..=cursor]` are applied; anything after the cursor is the redo
//! branch, discarded as soon as a new move is recorded.

use serde::{Deserialize, Serialize};

use crate::executor::MoveRecord;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawHistory")]
pub struct History {
    moves: Vec<MoveRecord>,
    /// Index of the last applied record; `None` before the first move.
    cursor: Option<usize>,
}

/// Wire form of [`History`]; the cursor is clamped on conversion.
#[derive(Deserialize)]
pub(crate) struct RawHistory {
    #[serde(default)]
    pub moves: Vec<MoveRecord>,
    #[serde(default)]
    pub cursor: Option<usize>,
}

impl From<RawHistory> for History {
    fn from(raw: RawHistory) -> Self {
        History::from_parts(raw.moves, raw.cursor)
    }
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from saved parts. An out-of-range cursor is clamped to the
    /// last record.
    pub fn from_parts(moves: Vec<MoveRecord>, cursor: Option<usize>) -> Self {
        let cursor = match (cursor, moves.len()) {
            (_, 0) => None,
            (Some(c), len) => Some(c.min(len - 1)),
            (None, _) => None,
        };
        Self { moves, cursor }
    }

    /// Raw rebuild for loaders that report a bad cursor before clamping it.
    pub(crate) fn from_parts_unclamped(moves: Vec<MoveRecord>, cursor: Option<usize>) -> Self {
        Self { moves, cursor }
    }

    /// Append a committed move, dropping the redo branch first.
    pub fn record(&mut self, mv: MoveRecord) {
        self.moves.truncate(self.applied());
        self.moves.push(mv);
        self.cursor = Some(self.moves.len() - 1);
    }

    /// Step the cursor back, returning the record that was undone.
    pub fn undo(&mut self) -> Option<&MoveRecord> {
        let c = self.cursor?;
        self.cursor = c.checked_sub(1);
        self.moves.get(c)
    }

    /// Step the cursor forward, returning the record that was redone.
    pub fn redo(&mut self) -> Option<&MoveRecord> {
        if !self.can_redo() {
            return None;
        }
        let next = self.applied();
        self.cursor = Some(next);
        self.moves.get(next)
    }

    pub fn can_undo(&self) -> bool {
        self.cursor.is_some()
    }

    pub fn can_redo(&self) -> bool {
        self.applied() < self.moves.len()
    }

    /// The last applied record.
    pub fn current(&self) -> Option<&MoveRecord> {
        self.cursor.and_then(|c| self.moves.get(c))
    }

    /// Number of applied records.
    pub fn applied(&self) -> usize {
        self.cursor.map_or(0, |c| c + 1)
    }

    /// Applied records only, oldest first.
    pub fn applied_moves(&self) -> &[MoveRecord] {
        &self.moves[..self.applied()]
    }

    /// Every record including the redo branch.
    pub fn moves(&self) -> &[MoveRecord] {
        &self.moves
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }

    pub fn clear(&mut self) {
        self.moves.clear();
        self.cursor = None;
    }
}

#[cfg(test)]
#[path = "history_tests.rs"]
mod history_tests;
