//! Game sessions: turn order, opponent replies, undo, result reporting.
//!
//! A session owns its [`GameState`] and borrows the statistics store for
//! the length of one game. Each finished game reports one result per
//! participating player.

mod error;
pub mod invariants;
mod single;
mod state;
mod two_player;

pub use error::SessionError;
pub use single::{SessionPhase, SinglePlayerSession};
pub use state::GameState;
pub use two_player::TwoPlayerSession;
