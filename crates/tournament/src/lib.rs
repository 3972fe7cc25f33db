//! Self-play arena for the heuristic selectors
//!
//! This crate provides infrastructure for:
//! - Running matches between move-selector tiers through the full rules engine
//! - Saving and resuming single games as JSON snapshots
//! - Generating reports of match results
//!
//! # Usage
//!
//! ```bash
//! # Run a match between the hard and easy tiers
//! cargo run -p tournament -- match scored random --games 20
//!
//! # Play one game, save it, and finish it later
//! cargo run -p tournament -- play greedy scored --max-plies 30 --save game.json
//! cargo run -p tournament -- resume game.json
//! ```

mod config;
mod match_runner;
mod results;

pub use config::*;
pub use match_runner::*;
pub use results::*;
