//! Tic-tac-toe on a 3x3 board.
//!
//! The board and its rules, the move history used for undo, and the
//! computer opponent's search and strength tiers.

mod action;
mod history;
mod position;
pub mod rules;
pub mod search;
mod strategy;
mod types;

pub use action::{Move, MoveError};
pub use history::{HISTORY_CAPACITY, HistoryError, MAX_UNDO, MoveHistory};
pub use position::Position;
pub use rules::{LINES, Outcome, check_winner, is_draw, is_full};
pub use search::{SearchResult, best_move, find_blocking_move, minimax, search};
pub use strategy::Difficulty;
pub use types::{Board, ParseBoardError, Player, Square};
