//! Save/load of a whole game.
//!
//! Loading is forgiving: every top-level field is parsed on its own, and a
//! missing or malformed field falls back to its default and is reported as a
//! [`SnapshotIssue`] instead of failing the load.

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use serde_json::{Map, Value};
use std::fmt;
use tracing::warn;

use crate::{
    board::{Board, CastlingRights, KingSquares, Position},
    captured::CapturedPieces,
    error::{ChessError, Result},
    executor::MoveRecord,
    game::{Game, GameStatus},
    history::{History, RawHistory},
    types::*,
};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub position: Board,
    pub side_to_move: Color,
    pub castling_rights: CastlingRights,
    pub king_squares: KingSquares,
    pub en_passant_target: Option<Square>,
    pub history: History,
    pub captured: CapturedPieces,
    pub game_over: bool,
    /// Terminal status, so a time forfeit survives a reload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<GameStatus>,
    /// Undo floor for games that did not start from the standard setup.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub initial_position: Option<Position>,
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Game::new().snapshot()
    }
}

/// Something that had to be defaulted or repaired while loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SnapshotIssue {
    NotAnObject(String),
    MissingField(&'static str),
    InvalidField { field: &'static str, reason: String },
    KingSquaresRepaired,
    BoardReplaced(String),
    CursorClamped { cursor: usize, len: usize },
    HistoryDropped(String),
    InitialPositionDropped(String),
}

impl fmt::Display for SnapshotIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SnapshotIssue::NotAnObject(why) => write!(f, "not a saved game ({why}); starting a new one"),
            SnapshotIssue::MissingField(name) => write!(f, "field `{name}` missing, using default"),
            SnapshotIssue::InvalidField { field, reason } => {
                write!(f, "field `{field}` invalid ({reason}), using default")
            }
            SnapshotIssue::KingSquaresRepaired => write!(f, "king squares recomputed from the board"),
            SnapshotIssue::BoardReplaced(why) => write!(f, "board replaced by the starting setup: {why}"),
            SnapshotIssue::CursorClamped { cursor, len } => {
                write!(f, "history cursor {cursor} clamped to {len} recorded moves")
            }
            SnapshotIssue::HistoryDropped(why) => write!(f, "history dropped: {why}"),
            SnapshotIssue::InitialPositionDropped(why) => write!(f, "initial position dropped: {why}"),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadedSnapshot {
    pub snapshot: GameSnapshot,
    pub issues: Vec<SnapshotIssue>,
}

impl GameSnapshot {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).map_err(|e| ChessError::MalformedSnapshot(e.to_string()))
    }

    /// Parse saved text, defaulting and repairing as needed. Never fails.
    pub fn from_json(text: &str) -> LoadedSnapshot {
        let mut issues = Vec::new();
        let obj = match serde_json::from_str::<Value>(text) {
            Ok(Value::Object(map)) => map,
            Ok(other) => {
                issues.push(SnapshotIssue::NotAnObject(format!("top level is {}", json_kind(&other))));
                Map::new()
            }
            Err(e) => {
                issues.push(SnapshotIssue::NotAnObject(e.to_string()));
                Map::new()
            }
        };
        // A non-object input is a single issue, not one per missing field.
        let quiet = !issues.is_empty();
        let mut reader = FieldReader {
            obj: &obj,
            issues: &mut issues,
            quiet,
        };

        let position = reader.required("position").unwrap_or_else(Board::starting);
        let side_to_move = reader.required("side_to_move").unwrap_or(Color::White);
        let castling_rights = reader.required("castling_rights").unwrap_or_default();
        let stored_kings: Option<KingSquares> = reader.required("king_squares");
        let en_passant_target = reader
            .required::<Option<Square>>("en_passant_target")
            .flatten();
        let history = reader
            .required::<RawHistory>("history")
            .map(|h| History::from_parts_unclamped(h.moves, h.cursor))
            .unwrap_or_default();
        let captured = reader.required("captured").unwrap_or_default();
        let game_over = reader.required("game_over").unwrap_or(false);
        let outcome = reader.optional("outcome");
        let initial_position = reader.optional("initial_position");

        let mut snapshot = GameSnapshot {
            position,
            side_to_move,
            castling_rights,
            king_squares: stored_kings.unwrap_or_default(),
            en_passant_target,
            history,
            captured,
            game_over,
            outcome,
            initial_position,
        };
        let missing_kings = stored_kings.is_none();
        for issue in snapshot.repair() {
            // Absent king squares were already reported as missing.
            if missing_kings && issue == SnapshotIssue::KingSquaresRepaired {
                continue;
            }
            issues.push(issue);
        }
        LoadedSnapshot { snapshot, issues }
    }

    /// Make the snapshot internally consistent, reporting what changed.
    pub fn repair(&mut self) -> Vec<SnapshotIssue> {
        let mut issues = Vec::new();

        match Position::from_parts(
            self.position.clone(),
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
        ) {
            Ok(pos) => {
                if pos.king_squares() != self.king_squares {
                    self.king_squares = pos.king_squares();
                    issues.push(SnapshotIssue::KingSquaresRepaired);
                }
            }
            Err(e) => {
                self.position = Board::starting();
                self.king_squares = KingSquares::default();
                self.en_passant_target = None;
                issues.push(SnapshotIssue::BoardReplaced(e.to_string()));
            }
        }

        let len = self.history.len();
        if let Some(cursor) = self.history.cursor() {
            if cursor >= len {
                issues.push(SnapshotIssue::CursorClamped { cursor, len });
            }
        }
        let mut moves = Vec::with_capacity(len);
        for (i, record) in self.history.moves().iter().enumerate() {
            match revalidate(&record.snapshot) {
                Ok(snapshot) => moves.push(MoveRecord {
                    snapshot,
                    ..record.clone()
                }),
                Err(e) => {
                    issues.push(SnapshotIssue::HistoryDropped(format!("move {}: {e}", i + 1)));
                    moves.clear();
                    break;
                }
            }
        }
        let cursor = if moves.is_empty() { None } else { self.history.cursor() };
        self.history = History::from_parts(moves, cursor);

        if let Some(initial) = &self.initial_position {
            match revalidate(initial) {
                Ok(pos) => self.initial_position = Some(pos),
                Err(e) => {
                    self.initial_position = None;
                    issues.push(SnapshotIssue::InitialPositionDropped(e.to_string()));
                }
            }
        }

        for issue in &issues {
            warn!(%issue, "snapshot repaired");
        }
        issues
    }
}

fn revalidate(pos: &Position) -> Result<Position> {
    Position::from_parts(pos.board().clone(), pos.side_to_move, pos.castling, pos.en_passant)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

struct FieldReader<'a> {
    obj: &'a Map<String, Value>,
    issues: &'a mut Vec<SnapshotIssue>,
    quiet: bool,
}

impl FieldReader<'_> {
    fn required<T: DeserializeOwned>(&mut self, name: &'static str) -> Option<T> {
        match self.obj.get(name) {
            Some(v) => self.parse(name, v),
            None => {
                if !self.quiet {
                    self.issues.push(SnapshotIssue::MissingField(name));
                }
                None
            }
        }
    }

    /// Extension fields may be absent or null without an issue.
    fn optional<T: DeserializeOwned>(&mut self, name: &'static str) -> Option<T> {
        match self.obj.get(name) {
            None | Some(Value::Null) => None,
            Some(v) => self.parse(name, v),
        }
    }

    fn parse<T: DeserializeOwned>(&mut self, name: &'static str, v: &Value) -> Option<T> {
        match serde_json::from_value(v.clone()) {
            Ok(t) => Some(t),
            Err(e) => {
                self.issues.push(SnapshotIssue::InvalidField {
                    field: name,
                    reason: e.to_string(),
                });
                None
            }
        }
    }
}

impl Game {
    pub fn snapshot(&self) -> GameSnapshot {
        let over = self.status.is_terminal();
        GameSnapshot {
            position: self.position.board().clone(),
            side_to_move: self.position.side_to_move,
            castling_rights: self.position.castling,
            king_squares: self.position.king_squares(),
            en_passant_target: self.position.en_passant,
            history: self.history.clone(),
            captured: self.captured.clone(),
            game_over: over,
            outcome: over.then_some(self.status),
            initial_position: (self.initial != Position::startpos()).then(|| self.initial.clone()),
        }
    }

    /// Rebuild a game, repairing the snapshot first. A pending promotion is
    /// never part of a snapshot.
    pub fn from_snapshot(mut snapshot: GameSnapshot) -> Game {
        snapshot.repair();
        let position = Position::from_parts(
            snapshot.position,
            snapshot.side_to_move,
            snapshot.castling_rights,
            snapshot.en_passant_target,
        )
        .unwrap_or_else(|_| Position::startpos());

        let evaluated = GameStatus::evaluate(&position);
        let status = if snapshot.game_over {
            match snapshot.outcome {
                Some(s) if s.is_terminal() => s,
                _ if evaluated.is_terminal() => evaluated,
                // Over with no board reason: only a flag fall explains it.
                _ => GameStatus::TimeExpired {
                    winner: position.side_to_move.opposite(),
                },
            }
        } else {
            evaluated
        };

        Game {
            initial: snapshot.initial_position.unwrap_or_else(Position::startpos),
            position,
            history: snapshot.history,
            captured: snapshot.captured,
            status,
            pending: None,
        }
    }

    /// Load saved text into a game, returning whatever had to be repaired.
    pub fn load_json(text: &str) -> (Game, Vec<SnapshotIssue>) {
        let LoadedSnapshot { snapshot, issues } = GameSnapshot::from_json(text);
        (Game::from_snapshot(snapshot), issues)
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod snapshot_tests;
