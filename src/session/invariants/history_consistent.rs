//! History consistency invariant: replaying history rebuilds the board.

use super::super::GameState;
use super::Invariant;

/// Invariant: the move history, replayed on an empty board, reproduces the
/// current board exactly.
///
/// No moves are missing, no squares are filled without a move, and no two
/// moves share a square.
pub struct HistoryConsistentInvariant;

impl Invariant<GameState> for HistoryConsistentInvariant {
    fn holds(state: &GameState) -> bool {
        match state.history().replay() {
            Ok(rebuilt) => rebuilt == *state.board(),
            Err(_) => false,
        }
    }

    fn description() -> &'static str {
        "Replaying the move history reproduces the board"
    }
}
