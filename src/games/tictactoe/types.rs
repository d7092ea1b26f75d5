//! Core domain types for tic-tac-toe.

use std::fmt;
use std::str::FromStr;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use super::action::MoveError;
use super::position::Position;
use super::rules;

/// Mark owner on the board.
///
/// `X` always moves first. In single-player games `X` is the human and `O`
/// is the computer opponent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display, strum::EnumIter,
)]
pub enum Player {
    /// Player X (goes first).
    X,
    /// Player O (goes second).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    fn symbol(self) -> char {
        match self {
            Square::Empty => ' ',
            Square::Occupied(Player::X) => 'X',
            Square::Occupied(Player::O) => 'O',
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// `Board` is `Copy`: the search derives candidate boards with
/// [`Board::with_mark`] instead of mutating a shared grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub(crate) fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Places `player`'s mark at `(row, col)`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] for coordinates outside `0..3` and
    /// [`MoveError::SquareOccupied`] when the cell already holds a mark. The
    /// board is left untouched on error.
    #[instrument(skip(self))]
    pub fn place(&mut self, row: usize, col: usize, player: Player) -> Result<Position, MoveError> {
        let pos = Position::from_coords(row, col).ok_or(MoveError::OutOfRange { row, col })?;
        self.place_at(pos, player)?;
        Ok(pos)
    }

    /// Places `player`'s mark at `pos`.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SquareOccupied`] when the cell already holds a mark.
    pub fn place_at(&mut self, pos: Position, player: Player) -> Result<(), MoveError> {
        if !self.is_empty(pos) {
            return Err(MoveError::SquareOccupied(pos));
        }
        self.set(pos, Square::Occupied(player));
        Ok(())
    }

    /// Clears the cell at `(row, col)` back to empty.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::OutOfRange`] for coordinates outside `0..3`.
    #[instrument(skip(self))]
    pub fn clear(&mut self, row: usize, col: usize) -> Result<(), MoveError> {
        let pos = Position::from_coords(row, col).ok_or(MoveError::OutOfRange { row, col })?;
        self.clear_at(pos);
        Ok(())
    }

    /// Clears the cell at `pos` back to empty.
    pub fn clear_at(&mut self, pos: Position) {
        self.set(pos, Square::Empty);
    }

    /// Returns a copy of this board with `player`'s mark at `pos`.
    ///
    /// The receiver is not modified; an occupied `pos` is overwritten in the
    /// copy, so callers pass empty positions only.
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = *self;
        next.set(pos, Square::Occupied(player));
        next
    }

    /// Returns the owner of a completed line, if any.
    pub fn terminal_result(&self) -> Option<Player> {
        rules::check_winner(self)
    }

    /// True when no empty square remains.
    pub fn is_full(&self) -> bool {
        rules::is_full(self)
    }

    /// Empty positions in row-major order.
    pub fn empty_positions(&self) -> Vec<Position> {
        Position::valid_moves(self)
    }

    /// Number of marks `player` has on the board.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|s| **s == Square::Occupied(player))
            .count()
    }

    /// Total number of marks on the board.
    pub fn occupied(&self) -> usize {
        self.squares.iter().filter(|s| **s != Square::Empty).count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            let cells: Vec<String> = (0..3)
                .map(|col| format!(" {} ", self.squares[row * 3 + col].symbol()))
                .collect();
            writeln!(f, "{}", cells.join("|"))?;
            if row < 2 {
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

/// Error parsing a board from its compact text form.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
#[display("Invalid board text: {}", reason)]
pub struct ParseBoardError {
    reason: String,
}

/// Parses `"XX_/OO_/___"`: three rows separated by `/`, each cell one of
/// `X`, `O`, `_` or a space. Whitespace around rows is not trimmed.
impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        if rows.len() != 3 {
            return Err(ParseBoardError {
                reason: format!("expected 3 rows, found {}", rows.len()),
            });
        }

        let mut board = Board::new();
        for (row, text) in rows.iter().enumerate() {
            let cells: Vec<char> = text.chars().collect();
            if cells.len() != 3 {
                return Err(ParseBoardError {
                    reason: format!("row {} has {} cells", row, cells.len()),
                });
            }
            for (col, c) in cells.into_iter().enumerate() {
                let square = match c {
                    'X' | 'x' => Square::Occupied(Player::X),
                    'O' | 'o' => Square::Occupied(Player::O),
                    '_' | ' ' | '.' => Square::Empty,
                    other => {
                        return Err(ParseBoardError {
                            reason: format!("unexpected cell '{}' at ({}, {})", other, row, col),
                        });
                    }
                };
                board.squares[row * 3 + col] = square;
            }
        }
        Ok(board)
    }
}
