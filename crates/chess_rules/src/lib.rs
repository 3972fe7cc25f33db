pub mod board;
pub mod captured;
pub mod clock;
pub mod error;
pub mod executor;
pub mod game;
pub mod history;
pub mod movegen;
pub mod notation;
pub mod perft;
pub mod snapshot;
pub mod types;

// Re-export the rules API
pub use board::*;
pub use captured::CapturedPieces;
pub use clock::*;
pub use error::{ChessError, Result};
pub use executor::{Execution, MoveRecord, PendingPromotion};
pub use game::*;
pub use history::History;
pub use movegen::*;
pub use perft::perft;
pub use snapshot::*;
pub use types::*;

// =============================================================================
// Move selector trait, implemented by computer opponents
// =============================================================================

/// Trait for anything that picks a move from a legal-move list.
///
/// Selectors never see mutable game state: they get the current position and
/// the validator's legal moves for the side to move, and return one of them.
pub trait MoveSelector: Send {
    /// Choose one of `legal`. Returns `None` only when `legal` is empty.
    fn choose(&mut self, pos: &Position, legal: &[Move]) -> Option<Move>;

    /// Short identifier used in match reports.
    fn name(&self) -> &str;

    /// Reset internal state for a new game.
    fn new_game(&mut self) {}
}
