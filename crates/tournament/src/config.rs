//! Match configuration loaded from TOML.

use anyhow::{Context, Result};
use chess_rules::TimeControl;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::match_runner::MatchConfig;

/// Every field has a default, so a partial file (or none) is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaConfig {
    /// Number of games to play
    pub games: u32,
    /// Plies after which an unfinished game is scored as a draw
    pub max_plies: u32,
    /// Strategy of the first selector (`random`, `greedy`, `scored` or a difficulty name)
    pub engine1: String,
    /// Strategy of the second selector
    pub engine2: String,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Base RNG seed; unseeded selectors when absent
    pub seed: Option<u64>,
    pub time_control: TimeControl,
    /// Simulated thinking time charged to the clock per ply, in milliseconds
    pub think_time_ms: u64,
    /// Where to write match results as JSON
    pub results_path: Option<PathBuf>,
    /// Print a line per finished game
    pub verbose: bool,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            games: 10,
            max_plies: 200,
            engine1: "scored".to_string(),
            engine2: "random".to_string(),
            alternate_colors: true,
            seed: None,
            time_control: TimeControl::unlimited(),
            think_time_ms: 0,
            results_path: None,
            verbose: true,
        }
    }
}

impl ArenaConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        Self::from_toml_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn match_config(&self) -> MatchConfig {
        MatchConfig {
            num_games: self.games,
            max_plies: self.max_plies,
            alternate_colors: self.alternate_colors,
            verbose: self.verbose,
            time_control: self.time_control,
            think_time: Duration::from_millis(self.think_time_ms),
        }
    }
}
