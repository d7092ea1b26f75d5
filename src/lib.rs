//! Tic-tac-toe engine with a tiered computer opponent.
//!
//! The library holds the 3x3 board and its rules, a move history that makes
//! undo exact, the opponent's search (blocking heuristic and full minimax),
//! game sessions for one or two humans, and per-player statistics.
//!
//! # Architecture
//!
//! - **Games**: board, positions, rules, history, search, difficulty tiers
//! - **Session**: turn order, opponent replies, undo and redo, result reporting
//! - **Stats**: per-name win/loss/draw tallies, in memory or in a JSON file
//! - **Terminal**: text menus and prompts over any reader and writer
//!
//! # Example
//!
//! ```
//! use tic_tac_toe::{Difficulty, MemoryStats, Outcome, SinglePlayerSession};
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//!
//! # fn example() -> Result<(), tic_tac_toe::SessionError> {
//! let mut stats = MemoryStats::new();
//! let mut session = SinglePlayerSession::new(
//!     "Ann".to_string(),
//!     Difficulty::Impossible,
//!     false,
//!     &mut stats,
//!     StdRng::seed_from_u64(1),
//! )?;
//! session.apply_human_move(0, 0)?;
//! assert_eq!(session.apply_opponent_move()?, Outcome::InProgress);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod games;
mod session;
mod stats;

pub mod cli;
pub mod terminal;

// Crate-level exports - Configuration
pub use config::{ConfigError, GameConfig};

// Crate-level exports - Game types (tic-tac-toe)
pub use games::tictactoe::{
    Board, Difficulty, HISTORY_CAPACITY, HistoryError, LINES, MAX_UNDO, Move, MoveError, MoveHistory,
    Outcome, ParseBoardError, Player, Position, SearchResult, Square, best_move, check_winner,
    find_blocking_move, is_draw, is_full, minimax, search,
};

// Crate-level exports - Session management
pub use session::invariants::{
    AlternatingTurnInvariant, HistoryConsistentInvariant, Invariant, InvariantSet,
    InvariantViolation, MarkBalanceInvariant, TicTacToeInvariants,
};
pub use session::{GameState, SessionError, SessionPhase, SinglePlayerSession, TwoPlayerSession};

// Crate-level exports - Statistics
pub use stats::{GameOutcome, JsonFileStats, MemoryStats, PlayerStats, StatsError, StatsStore};
