//! Opponent strength tiers.

use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::search::{best_move, find_blocking_move};
use super::{Board, Position};

/// Computer opponent strength, chosen once per session.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    clap::ValueEnum,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Difficulty {
    /// Tier 1: block an immediate threat, otherwise play a random cell.
    #[default]
    Easy,
    /// Tier 2: same play as [`Difficulty::Easy`].
    Medium,
    /// Tier 3: exhaustive minimax.
    Impossible,
}

impl Difficulty {
    /// Picks `O`'s next cell on `board`, `None` when the board is full.
    #[instrument(skip(board, rng))]
    pub fn choose_move<R: Rng + ?Sized>(self, board: &Board, rng: &mut R) -> Option<Position> {
        let choice = match self {
            Difficulty::Easy | Difficulty::Medium => {
                find_blocking_move(board).or_else(|| random_move(board, rng))
            }
            Difficulty::Impossible => best_move(board),
        };
        debug!(difficulty = %self, ?choice, "Opponent move chosen");
        choice
    }

    /// Whether the front end offers "Undo move?" after each opponent reply.
    pub fn offers_turn_undo(self) -> bool {
        matches!(self, Difficulty::Easy)
    }

    /// Whether an opponent win can be taken back with redo, when enabled.
    pub fn supports_redo(self) -> bool {
        matches!(self, Difficulty::Impossible)
    }

    /// Menu label.
    pub fn label(self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Impossible => "Impossible",
        }
    }

    /// One-based tier number.
    pub fn tier(self) -> u8 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Impossible => 3,
        }
    }
}

/// Uniformly random empty cell.
fn random_move<R: Rng + ?Sized>(board: &Board, rng: &mut R) -> Option<Position> {
    board.empty_positions().choose(rng).copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::str::FromStr;

    #[test]
    fn test_easy_blocks_threat() {
        let board: Board = "XX_/_O_/___".parse().expect("Valid board");
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            assert_eq!(
                Difficulty::Easy.choose_move(&board, &mut rng),
                Some(Position::TopRight)
            );
        }
    }

    #[test]
    fn test_medium_matches_easy() {
        let board: Board = "X__/_O_/___".parse().expect("Valid board");
        let mut easy_rng = StdRng::seed_from_u64(42);
        let mut medium_rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            assert_eq!(
                Difficulty::Easy.choose_move(&board, &mut easy_rng),
                Difficulty::Medium.choose_move(&board, &mut medium_rng)
            );
        }
    }

    #[test]
    fn test_random_fallback_picks_empty_cell() {
        let board: Board = "XO_/_O_/_X_".parse().expect("Valid board");
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..50 {
            let pos = Difficulty::Easy
                .choose_move(&board, &mut rng)
                .expect("Board has room");
            assert!(board.is_empty(pos));
        }
    }

    #[test]
    fn test_full_board_yields_none() {
        let board: Board = "XOX/OXO/OXO".parse().expect("Valid board");
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(Difficulty::Easy.choose_move(&board, &mut rng), None);
        assert_eq!(Difficulty::Impossible.choose_move(&board, &mut rng), None);
    }

    #[test]
    fn test_impossible_uses_minimax() {
        let board: Board = "X__/___/___".parse().expect("Valid board");
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(
            Difficulty::Impossible.choose_move(&board, &mut rng),
            Some(Position::Center)
        );
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Difficulty::from_str("impossible"), Ok(Difficulty::Impossible));
        assert_eq!(Difficulty::from_str("Medium"), Ok(Difficulty::Medium));
        assert_eq!(Difficulty::Easy.to_string(), "easy");
        assert!(Difficulty::from_str("hard").is_err());
    }
}
