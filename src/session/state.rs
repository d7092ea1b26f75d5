//! Board, history and turn owned together.

use tracing::{debug, instrument};

use super::SessionError;
use super::invariants::assert_invariants;
use crate::games::tictactoe::{Board, Move, MoveError, MoveHistory, Outcome, Player, Position};

/// Board and move history for one game, kept in lockstep.
///
/// Every applied move is placed on the board and recorded in the history
/// together; every undo removes both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameState {
    pub(super) board: Board,
    pub(super) history: MoveHistory,
}

impl GameState {
    /// Creates an empty game with `X` to move.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns move history.
    pub fn history(&self) -> &MoveHistory {
        &self.history
    }

    /// Player due to move next.
    pub fn to_move(&self) -> Player {
        self.history
            .last()
            .map(|last| last.player.opponent())
            .unwrap_or(Player::X)
    }

    /// Outcome derived from the current board.
    pub fn outcome(&self) -> Outcome {
        Outcome::from_board(&self.board)
    }

    /// Places the mark of the player to move at `(row, col)`.
    ///
    /// # Errors
    ///
    /// See [`GameState::apply`].
    pub fn apply_coords(&mut self, row: usize, col: usize) -> Result<Outcome, SessionError> {
        let pos = Position::from_coords(row, col).ok_or(MoveError::OutOfRange { row, col })?;
        self.apply(pos)
    }

    /// Places the mark of the player to move at `pos` and records it.
    ///
    /// # Errors
    ///
    /// [`MoveError::GameOver`] once the game has ended,
    /// [`MoveError::SquareOccupied`] for a taken cell,
    /// [`HistoryError::HistoryFull`](crate::games::tictactoe::HistoryError::HistoryFull)
    /// if board and history have diverged. Nothing changes on error.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn apply(&mut self, pos: Position) -> Result<Outcome, SessionError> {
        if self.outcome().is_terminal() {
            return Err(MoveError::GameOver.into());
        }

        let player = self.to_move();
        self.board.place_at(pos, player)?;
        if let Err(err) = self.history.record(Move::new(player, pos)) {
            self.board.clear_at(pos);
            return Err(err.into());
        }

        assert_invariants(self);

        let outcome = self.outcome();
        debug!(%player, %pos, %outcome, "Move applied");
        Ok(outcome)
    }

    /// Removes the `count` most recent moves from history and board.
    ///
    /// # Errors
    ///
    /// [`HistoryError::NothingToUndo`](crate::games::tictactoe::HistoryError::NothingToUndo)
    /// when fewer than `count` moves exist, and
    /// [`HistoryError::InvalidUndoCount`](crate::games::tictactoe::HistoryError::InvalidUndoCount)
    /// unless `count` is 1 or 2. Nothing changes on error.
    #[instrument(skip(self), fields(moves = self.history.len()))]
    pub fn undo(&mut self, count: usize) -> Result<Vec<Move>, SessionError> {
        let undone = self.history.undo_last(count, &mut self.board)?;
        assert_invariants(self);
        Ok(undone)
    }
}
