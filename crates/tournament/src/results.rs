//! Match results storage and reporting

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::config::ArenaConfig;
use crate::match_runner::{GameReport, MatchReport, MatchResult};

/// Complete match results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArenaResults {
    /// Name/description of the match
    pub name: String,
    /// Participating selectors, engine1 first
    pub participants: Vec<String>,
    /// Tally from engine1's perspective
    pub result: MatchResult,
    pub games: Vec<GameReport>,
    /// Configuration used
    pub config: ArenaConfig,
}

impl ArenaResults {
    pub fn new(name: &str, participants: Vec<String>, config: ArenaConfig, report: MatchReport) -> Self {
        Self {
            name: name.to_string(),
            participants,
            result: report.result,
            games: report.games,
            config,
        }
    }

    /// Save results to JSON file
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize results")?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))
    }

    /// Load results from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&contents).with_context(|| format!("failed to parse {}", path.display()))
    }

    /// Generate a text report
    pub fn generate_report(&self) -> String {
        let mut report = String::new();
        report.push_str(&format!("=== Match: {} ===\n\n", self.name));
        report.push_str(&format!("Participants: {}\n", self.participants.join(", ")));
        report.push_str(&format!(
            "Config: {} games, max {} plies, clock {}\n\n",
            self.config.games, self.config.max_plies, self.config.time_control
        ));

        report.push_str(&format!(
            "{:<4} {:<20} {:<20} {:<6} {:>6}  {}\n",
            "#", "White", "Black", "Result", "Plies", "Outcome"
        ));
        report.push_str(&"-".repeat(80));
        report.push('\n');

        for (i, game) in self.games.iter().enumerate() {
            report.push_str(&format!(
                "{:<4} {:<20} {:<20} {:<6} {:>6}  {}\n",
                i + 1,
                game.white,
                game.black,
                game.result.score_str(),
                game.plies,
                game.status
            ));
        }

        report.push('\n');
        report.push_str(&format!(
            "Total: {}-{}-{} (Score: {:.1}%)\n",
            self.result.wins,
            self.result.losses,
            self.result.draws,
            self.result.score() * 100.0
        ));
        report
    }

    /// Print report to stdout
    pub fn print_report(&self) {
        println!("{}", self.generate_report());
    }
}
