//! Exhaustive minimax search.
//!
//! `O` (the computer) maximizes, `X` (the human) minimizes. Terminal
//! scores are depth-adjusted so quicker `O` wins and slower `X` wins
//! score better for `O`:
//!
//! | Board            | Score          |
//! |------------------|----------------|
//! | `O` line         | `10 - depth`   |
//! | `X` line         | `-10 + depth`  |
//! | full, no line    | `0`            |
//!
//! There is no pruning and no transposition table. The 3x3 tree has fewer
//! than a million nodes, so the full search finishes quickly.

use tracing::{debug, instrument};

use super::super::{Board, Player, Position};

/// Score of an immediate win.
pub const WIN_SCORE: i32 = 10;

/// Result of a root search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    /// Best move for `O`, `None` on a full board.
    pub best_move: Option<Position>,
    /// Minimax score of `best_move`.
    pub score: i32,
    /// Boards visited.
    pub nodes: u64,
}

/// Scores `board` by exhaustive search.
///
/// `opponent_to_move` is true when `O` chooses the next mark. `depth` is the
/// number of plies already played below the root move.
pub fn minimax(board: &Board, depth: i32, opponent_to_move: bool) -> i32 {
    let mut nodes = 0;
    score(board, depth, opponent_to_move, &mut nodes)
}

fn score(board: &Board, depth: i32, opponent_to_move: bool, nodes: &mut u64) -> i32 {
    *nodes += 1;

    match board.terminal_result() {
        Some(Player::O) => return WIN_SCORE - depth,
        Some(Player::X) => return -WIN_SCORE + depth,
        None => {}
    }
    if board.is_full() {
        return 0;
    }

    let mark = if opponent_to_move { Player::O } else { Player::X };
    let children = board
        .empty_positions()
        .into_iter()
        .map(|pos| score(&board.with_mark(pos, mark), depth + 1, !opponent_to_move, nodes));

    let best = if opponent_to_move {
        children.max()
    } else {
        children.min()
    };
    best.unwrap_or(0)
}

/// Picks `O`'s move by scoring every empty cell with [`minimax`].
///
/// Cells are tried in row-major order and only a strictly greater score
/// replaces the current best, so the first cell wins ties.
#[instrument(skip(board), fields(empty = board.empty_positions().len()))]
pub fn search(board: &Board) -> SearchResult {
    let mut nodes = 0;
    let mut best: Option<(Position, i32)> = None;

    for pos in board.empty_positions() {
        let child = board.with_mark(pos, Player::O);
        let value = score(&child, 0, false, &mut nodes);
        if best.is_none_or(|(_, best_value)| value > best_value) {
            best = Some((pos, value));
        }
    }

    let result = SearchResult {
        best_move: best.map(|(pos, _)| pos),
        score: best.map(|(_, value)| value).unwrap_or(0),
        nodes,
    };
    debug!(
        best_move = ?result.best_move,
        score = result.score,
        nodes = result.nodes,
        "Minimax search complete"
    );
    result
}

/// Best move for `O`, `None` on a full board.
pub fn best_move(board: &Board) -> Option<Position> {
    search(board).best_move
}
