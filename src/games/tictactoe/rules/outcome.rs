//! Game outcome derived from a board.

use serde::{Deserialize, Serialize};

use super::super::{Board, Player};
use super::draw::is_draw;

/// Outcome of a game, always recomputed from the board.
///
/// `PlayerWin` is a line of `X` marks (the human, or player one in a
/// two-player game); `OpponentWin` is a line of `O` marks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Outcome {
    /// `X` completed a line.
    PlayerWin,
    /// `O` completed a line.
    OpponentWin,
    /// Full board, no line.
    Draw,
    /// Moves remain and nobody has won.
    InProgress,
}

impl Outcome {
    /// Derives the outcome of `board`.
    pub fn from_board(board: &Board) -> Self {
        match board.terminal_result() {
            Some(Player::X) => Outcome::PlayerWin,
            Some(Player::O) => Outcome::OpponentWin,
            None if is_draw(board) => Outcome::Draw,
            None => Outcome::InProgress,
        }
    }

    /// Returns the winner if there is one.
    pub fn winner(&self) -> Option<Player> {
        match self {
            Outcome::PlayerWin => Some(Player::X),
            Outcome::OpponentWin => Some(Player::O),
            Outcome::Draw | Outcome::InProgress => None,
        }
    }

    /// True once the game has ended.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    /// Returns true if the game was a draw.
    pub fn is_draw(&self) -> bool {
        matches!(self, Outcome::Draw)
    }
}

impl std::fmt::Display for Outcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Outcome::PlayerWin => write!(f, "Player X wins"),
            Outcome::OpponentWin => write!(f, "Player O wins"),
            Outcome::Draw => write!(f, "Draw"),
            Outcome::InProgress => write!(f, "In progress"),
        }
    }
}
