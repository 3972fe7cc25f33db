use serde::{Deserialize, Serialize};

use crate::types::{Color, Piece};

/// Pieces removed from the board, keyed by the colour that lost them.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapturedPieces {
    #[serde(default)]
    pub white: Vec<Piece>,
    #[serde(default)]
    pub black: Vec<Piece>,
}

impl CapturedPieces {
    pub fn add(&mut self, pc: Piece) {
        self.list_mut(pc.color).push(pc);
    }

    /// Remove the most recent entry equal to `pc`. Returns false if none matched.
    pub fn remove_latest(&mut self, pc: Piece) -> bool {
        let list = self.list_mut(pc.color);
        match list.iter().rposition(|&p| p == pc) {
            Some(i) => {
                list.remove(i);
                true
            }
            None => false,
        }
    }

    pub fn lost_by(&self, c: Color) -> &[Piece] {
        match c {
            Color::White => &self.white,
            Color::Black => &self.black,
        }
    }

    /// Material White has taken minus material Black has taken.
    pub fn material_balance(&self) -> i32 {
        let sum = |list: &[Piece]| list.iter().map(|p| p.kind.value() as i32).sum::<i32>();
        sum(&self.black) - sum(&self.white)
    }

    pub fn len(&self) -> usize {
        self.white.len() + self.black.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.white.clear();
        self.black.clear();
    }

    fn list_mut(&mut self, c: Color) -> &mut Vec<Piece> {
        match c {
            Color::White => &mut self.white,
            Color::Black => &mut self.black,
        }
    }
}
