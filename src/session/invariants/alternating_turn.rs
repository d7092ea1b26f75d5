//! Alternating turn invariant: players alternate X, O, X, O, ...

use super::super::GameState;
use super::Invariant;
use crate::games::tictactoe::Player;

/// Invariant: Players alternate turns.
///
/// Move history must show X, O, X, O, ... pattern.
/// First move is always X.
pub struct AlternatingTurnInvariant;

impl Invariant<GameState> for AlternatingTurnInvariant {
    fn holds(state: &GameState) -> bool {
        let moves = state.history().moves();

        if let Some(first) = moves.first()
            && first.player != Player::X
        {
            return false;
        }

        moves.windows(2).all(|pair| pair[0].player != pair[1].player)
    }

    fn description() -> &'static str {
        "Players alternate, X first"
    }
}
