//! Statistics records and per-player results.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::games::tictactoe::{Outcome, Player};

/// Game result from one player's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOutcome {
    /// Player won the game.
    Win,
    /// Player lost the game.
    Loss,
    /// Game ended in a draw.
    Draw,
}

impl GameOutcome {
    /// Result for whoever played `player`'s marks, `None` while in progress.
    #[instrument]
    pub fn for_player(outcome: Outcome, player: Player) -> Option<Self> {
        match (outcome, player) {
            (Outcome::InProgress, _) => None,
            (Outcome::Draw, _) => Some(Self::Draw),
            (Outcome::PlayerWin, Player::X) | (Outcome::OpponentWin, Player::O) => Some(Self::Win),
            (Outcome::PlayerWin, Player::O) | (Outcome::OpponentWin, Player::X) => Some(Self::Loss),
        }
    }
}

/// Tally of games for one player name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct PlayerStats {
    name: String,
    games_played: u32,
    games_won: u32,
    games_lost: u32,
    games_drawn: u32,
}

impl PlayerStats {
    /// Creates a zeroed record.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            games_played: 0,
            games_won: 0,
            games_lost: 0,
            games_drawn: 0,
        }
    }

    /// Counts one finished game.
    pub fn record(&mut self, outcome: GameOutcome) {
        self.games_played += 1;
        match outcome {
            GameOutcome::Win => self.games_won += 1,
            GameOutcome::Loss => self.games_lost += 1,
            GameOutcome::Draw => self.games_drawn += 1,
        }
    }

    /// Calculates win rate as a percentage (0.0–100.0), `0.0` with no games.
    pub fn win_percentage(&self) -> f64 {
        if self.games_played == 0 {
            0.0
        } else {
            (self.games_won as f64 / self.games_played as f64) * 100.0
        }
    }
}
