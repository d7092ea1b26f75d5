//! Search engine for the computer opponent.
//!
//! Contains:
//! - One-ply blocking heuristic
//! - Exhaustive minimax over every reachable terminal board
//!
//! Both work on board copies; the caller's board is never mutated.

pub mod blocking;
pub mod minimax;

pub use blocking::find_blocking_move;
pub use minimax::{SearchResult, best_move, minimax, search};
