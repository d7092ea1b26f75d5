//! Moves and move errors.
//!
//! A [`Move`] is what the history stores: who marked which cell. Undo
//! clears exactly those cells.

use super::{Player, Position};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One mark placed by one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, new)]
pub struct Move {
    /// Who moved.
    pub player: Player,
    /// Cell that was marked.
    pub position: Position,
}

impl std::fmt::Display for Move {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.player, self.position)
    }
}

/// Rejected placement. The board is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// Coordinates outside the 3x3 grid.
    #[display("Position ({}, {}) is off the board", row, col)]
    OutOfRange {
        /// Requested row.
        row: usize,
        /// Requested column.
        col: usize,
    },

    /// Cell already holds a mark.
    #[display("Square {} is already occupied", _0)]
    SquareOccupied(Position),

    /// A line is complete or the board is full.
    #[display("Game is already over")]
    GameOver,
}

impl std::error::Error for MoveError {}
