//! Bounded move history used for undo.

use derive_more::Display;
use tracing::{debug, instrument, warn};

use super::action::{Move, MoveError};
use super::types::Board;

/// One entry per cell.
pub const HISTORY_CAPACITY: usize = 9;

/// Most moves a single undo may take back: a human move and the reply to it.
pub const MAX_UNDO: usize = 2;

/// Error raised by [`MoveHistory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum HistoryError {
    /// Undo requested with fewer recorded moves than it would remove.
    #[display("Nothing to undo: {} requested, {} recorded", requested, available)]
    NothingToUndo {
        /// Number of entries the caller asked to remove.
        requested: usize,
        /// Number of entries recorded.
        available: usize,
    },

    /// Undo asked for zero moves or more than [`MAX_UNDO`].
    #[display("Undo takes back 1 to {} moves, not {}", MAX_UNDO, _0)]
    InvalidUndoCount(usize),

    /// A tenth move was recorded. Board and history have diverged.
    #[display("Move history is full ({} moves)", HISTORY_CAPACITY)]
    HistoryFull,
}

impl std::error::Error for HistoryError {}

/// Ordered record of applied moves, most recent last.
///
/// Replaying the moves on an empty board reproduces the board they were
/// recorded against.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveHistory {
    moves: Vec<Move>,
}

impl MoveHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        Self {
            moves: Vec::with_capacity(HISTORY_CAPACITY),
        }
    }

    /// Appends a move.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::HistoryFull`] if nine moves are already recorded.
    #[instrument(skip(self), fields(len = self.moves.len()))]
    pub fn record(&mut self, action: Move) -> Result<(), HistoryError> {
        if self.moves.len() >= HISTORY_CAPACITY {
            warn!(%action, "Move history overflow");
            return Err(HistoryError::HistoryFull);
        }
        self.moves.push(action);
        debug!(%action, len = self.moves.len(), "Move recorded");
        Ok(())
    }

    /// Removes the `count` most recent moves and clears their cells on `board`.
    ///
    /// Returns the removed moves, most recent first.
    ///
    /// # Errors
    ///
    /// Returns [`HistoryError::InvalidUndoCount`] unless `count` is 1 or 2, and
    /// [`HistoryError::NothingToUndo`] if fewer than `count` moves are
    /// recorded. Neither the history nor the board is modified in either case.
    #[instrument(skip(self, board), fields(len = self.moves.len()))]
    pub fn undo_last(&mut self, count: usize, board: &mut Board) -> Result<Vec<Move>, HistoryError> {
        if count == 0 || count > MAX_UNDO {
            debug!(count, "Undo count out of range");
            return Err(HistoryError::InvalidUndoCount(count));
        }
        if count > self.moves.len() {
            debug!(count, "Undo rejected");
            return Err(HistoryError::NothingToUndo {
                requested: count,
                available: self.moves.len(),
            });
        }

        let mut undone = Vec::with_capacity(count);
        for _ in 0..count {
            if let Some(action) = self.moves.pop() {
                board.clear_at(action.position);
                undone.push(action);
            }
        }
        debug!(count, remaining = self.moves.len(), "Moves undone");
        Ok(undone)
    }

    /// Rebuilds the board these moves produce from an empty start.
    ///
    /// # Errors
    ///
    /// Returns [`MoveError::SquareOccupied`] if two entries share a cell.
    pub fn replay(&self) -> Result<Board, MoveError> {
        let mut board = Board::new();
        for action in &self.moves {
            board.place_at(action.position, action.player)?;
        }
        Ok(board)
    }

    /// Recorded moves, oldest first.
    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Most recent move.
    pub fn last(&self) -> Option<&Move> {
        self.moves.last()
    }

    /// Number of recorded moves.
    pub fn len(&self) -> usize {
        self.moves.len()
    }

    /// True when nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}
