//! Session error types.

use derive_more::{Display, Error, From};

use crate::games::tictactoe::{HistoryError, MoveError};
use crate::stats::StatsError;

/// Error returned by session operations.
///
/// A rejected operation never changes the board or the history.
#[derive(Debug, Clone, Display, Error, From)]
pub enum SessionError {
    /// Illegal move: off the board, occupied, or game over.
    #[display("{}", _0)]
    Move(MoveError),

    /// Undo with too little history, or history overflow.
    #[display("{}", _0)]
    History(HistoryError),

    /// The statistics store rejected the result.
    #[display("{}", _0)]
    Stats(StatsError),

    /// A human move was submitted while the opponent is due.
    #[display("Waiting for the opponent's move")]
    #[from(ignore)]
    NotHumansTurn,

    /// An opponent move was requested while the human is due.
    #[display("Waiting for the human's move")]
    #[from(ignore)]
    NotOpponentsTurn,

    /// The redo offer must be accepted or declined first.
    #[display("Accept or decline the redo offer first")]
    #[from(ignore)]
    RedoPending,

    /// `accept_redo`/`decline_redo` without an offer.
    #[display("No redo has been offered")]
    #[from(ignore)]
    NoRedoOffered,
}

impl SessionError {
    /// True for errors the front end recovers from by asking again.
    pub fn is_recoverable(&self) -> bool {
        !matches!(
            self,
            SessionError::History(HistoryError::HistoryFull) | SessionError::Stats(_)
        )
    }
}
