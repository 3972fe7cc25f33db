//! Match runner for playing games between move selectors

use chess_rules::{
    Clock, Color, Game, GameStatus, MoveOutcome, MoveSelector, PieceKind, Result, TimeControl,
};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, info};

/// Configuration for a match
#[derive(Debug, Clone)]
pub struct MatchConfig {
    /// Number of games to play
    pub num_games: u32,
    /// Maximum plies per game before declaring draw
    pub max_plies: u32,
    /// Whether to alternate colors each game
    pub alternate_colors: bool,
    /// Print progress during match
    pub verbose: bool,
    pub time_control: TimeControl,
    /// Clock time charged per ply
    pub think_time: Duration,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            num_games: 10,
            max_plies: 200,
            alternate_colors: true,
            verbose: true,
            time_control: TimeControl::unlimited(),
            think_time: Duration::ZERO,
        }
    }
}

/// Result of a single game from one side's perspective
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Win,
    Loss,
    Draw,
}

impl GameResult {
    /// White's result for a finished (or capped) game.
    pub fn for_white(status: GameStatus) -> Self {
        match status.winner() {
            Some(Color::White) => GameResult::Win,
            Some(Color::Black) => GameResult::Loss,
            None => GameResult::Draw,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }

    pub fn score_str(self) -> &'static str {
        match self {
            GameResult::Win => "1-0",
            GameResult::Loss => "0-1",
            GameResult::Draw => "1/2",
        }
    }
}

/// Win/loss/draw tally from engine1's perspective
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
}

impl MatchResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn total_games(&self) -> u32 {
        self.wins + self.losses + self.draws
    }

    /// Score from engine1's perspective (1 for win, 0.5 for draw, 0 for loss)
    pub fn score(&self) -> f64 {
        let total = self.total_games() as f64;
        if total == 0.0 {
            return 0.5;
        }
        (self.wins as f64 + 0.5 * self.draws as f64) / total
    }
}

/// How one game went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub white: String,
    pub black: String,
    /// Final status; `InProgress` when the ply cap ended the game
    pub status: GameStatus,
    /// White's result
    pub result: GameResult,
    pub plies: usize,
    pub moves: Vec<String>,
}

/// Everything a match produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchReport {
    pub result: MatchResult,
    pub games: Vec<GameReport>,
}

/// Runs matches between two selectors
pub struct MatchRunner {
    config: MatchConfig,
}

impl MatchRunner {
    pub fn new(config: MatchConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    /// Run a match between two selectors
    ///
    /// The tally is from engine1's perspective
    pub fn run_match(
        &self,
        engine1: &mut dyn MoveSelector,
        engine2: &mut dyn MoveSelector,
    ) -> Result<MatchReport> {
        let mut result = MatchResult::new();
        let mut games = Vec::with_capacity(self.config.num_games as usize);

        for game_num in 0..self.config.num_games {
            // Alternate colors if configured
            let engine1_white = !self.config.alternate_colors || game_num % 2 == 0;

            let report = if engine1_white {
                self.play_game(engine1, engine2)?
            } else {
                self.play_game(engine2, engine1)?
            };
            let engine1_result = if engine1_white {
                report.result
            } else {
                report.result.flipped()
            };
            result.record(engine1_result);

            info!(
                game = game_num + 1,
                status = %report.status,
                plies = report.plies,
                "game finished"
            );
            if self.config.verbose {
                let color = if engine1_white { "W" } else { "B" };
                println!(
                    "Game {}/{}: {} ({}) - Score: {}-{}-{}",
                    game_num + 1,
                    self.config.num_games,
                    engine1_result.score_str(),
                    color,
                    result.wins,
                    result.losses,
                    result.draws
                );
            }
            games.push(report);
        }

        Ok(MatchReport { result, games })
    }

    /// Play a single game from the starting position
    pub fn play_game(
        &self,
        white: &mut dyn MoveSelector,
        black: &mut dyn MoveSelector,
    ) -> Result<GameReport> {
        let mut game = Game::new();
        white.new_game();
        black.new_game();
        self.continue_game(&mut game, white, black)
    }

    /// Play `game` on from its current state until it ends or hits the ply cap
    pub fn continue_game(
        &self,
        game: &mut Game,
        white: &mut dyn MoveSelector,
        black: &mut dyn MoveSelector,
    ) -> Result<GameReport> {
        let mut clock = Clock::new(self.config.time_control);
        clock.start(game.side_to_move());

        while !game.is_game_over() && game.ply() < self.config.max_plies as usize {
            let side = game.side_to_move();
            let legal = game.legal_moves();
            let selector: &mut dyn MoveSelector = match side {
                Color::White => &mut *white,
                Color::Black => &mut *black,
            };
            let Some(mv) = selector.choose(game.position(), &legal) else {
                break;
            };

            if let Some(flagged) = clock.tick(self.config.think_time) {
                game.report_time_expired(flagged)?;
                break;
            }

            match game.make_move(mv.from, mv.to)? {
                MoveOutcome::Committed(_) => {}
                MoveOutcome::PromotionPending(sq) => {
                    game.complete_promotion(sq, PieceKind::Queen)?;
                }
            }
            clock.switch_to(game.side_to_move());
        }

        let status = game.status();
        debug!(%status, plies = game.ply(), "game stopped");
        Ok(GameReport {
            white: white.name().to_string(),
            black: black.name().to_string(),
            status,
            result: GameResult::for_white(status),
            plies: game.ply(),
            moves: game
                .history()
                .applied_moves()
                .iter()
                .map(|r| r.notation.clone())
                .collect(),
        })
    }
}

/// Numbered move list such as `1. e4 e5 2. Nf3`, starting `1... ` when
/// Black made the first move.
pub fn format_move_list(first: Color, moves: &[String]) -> String {
    let mut parts = Vec::with_capacity(moves.len() / 2 + 1);
    let mut rest = moves;
    let mut number = 1;
    if first == Color::Black {
        if let Some((head, tail)) = moves.split_first() {
            parts.push(format!("1... {head}"));
            rest = tail;
            number = 2;
        }
    }
    for (i, pair) in rest.chunks(2).enumerate() {
        parts.push(format!("{}. {}", number + i, pair.join(" ")));
    }
    parts.join(" ")
}

#[cfg(test)]
#[path = "match_runner_tests.rs"]
mod match_runner_tests;
