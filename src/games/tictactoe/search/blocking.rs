//! One-ply blocking heuristic.

use tracing::{debug, instrument};

use super::super::{Board, Player, Position};

/// Returns the first empty cell, in row-major order, where an `X` would
/// complete a line.
///
/// Only the immediate threat is considered; whether blocking is itself a
/// good move is not.
#[instrument(skip(board))]
pub fn find_blocking_move(board: &Board) -> Option<Position> {
    let block = board
        .empty_positions()
        .into_iter()
        .find(|&pos| board.with_mark(pos, Player::X).terminal_result() == Some(Player::X));
    debug!(?block, "Blocking scan complete");
    block
}
