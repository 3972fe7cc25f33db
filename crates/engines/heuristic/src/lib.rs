//! Heuristic Move Selectors
//!
//! Three computer-opponent tiers that pick from the validator's legal moves
//! without any search:
//! - `Random`: uniform over all legal moves
//! - `Greedy`: uniform over captures, falling back to `Random`
//! - `Scored`: material gain, centre control and development, plus a little
//!   noise so repeated games differ
//!
//! Useful as sparring partners and as baselines for anything stronger.

use std::fmt;
use std::str::FromStr;

use chess_rules::{Move, MoveSelector, Position};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub mod tiers;

#[cfg(test)]
mod lib_tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    Random,
    Greedy,
    Scored,
}

impl Strategy {
    pub const ALL: [Strategy; 3] = [Strategy::Random, Strategy::Greedy, Strategy::Scored];

    pub fn as_str(self) -> &'static str {
        match self {
            Strategy::Random => "random",
            Strategy::Greedy => "greedy",
            Strategy::Scored => "scored",
        }
    }

    /// Difficulty label of the tier.
    pub fn difficulty(self) -> &'static str {
        match self {
            Strategy::Random => "easy",
            Strategy::Greedy => "medium",
            Strategy::Scored => "hard",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown strategy `{0}` (expected random, greedy, scored, easy, medium or hard)")]
pub struct UnknownStrategy(pub String);

impl FromStr for Strategy {
    type Err = UnknownStrategy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "random" | "easy" => Ok(Strategy::Random),
            "greedy" | "medium" => Ok(Strategy::Greedy),
            "scored" | "hard" => Ok(Strategy::Scored),
            _ => Err(UnknownStrategy(s.to_string())),
        }
    }
}

/// A move selector that owns its RNG.
#[derive(Debug, Clone)]
pub struct HeuristicEngine {
    strategy: Strategy,
    rng: StdRng,
    name: String,
}

impl HeuristicEngine {
    pub fn new(strategy: Strategy) -> Self {
        Self::with_rng(strategy, StdRng::from_entropy())
    }

    /// Reproducible selector for tests and seeded matches.
    pub fn seeded(strategy: Strategy, seed: u64) -> Self {
        Self::with_rng(strategy, StdRng::seed_from_u64(seed))
    }

    fn with_rng(strategy: Strategy, rng: StdRng) -> Self {
        Self {
            strategy,
            rng,
            name: format!("Heuristic ({strategy})"),
        }
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }
}

impl MoveSelector for HeuristicEngine {
    fn choose(&mut self, pos: &Position, legal: &[Move]) -> Option<Move> {
        match self.strategy {
            Strategy::Random => tiers::random_move(legal, &mut self.rng),
            Strategy::Greedy => tiers::greedy_move(pos, legal, &mut self.rng),
            Strategy::Scored => tiers::scored_move(pos, legal, &mut self.rng),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}
