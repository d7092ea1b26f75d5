//! Two humans sharing one board.

use tracing::{info, instrument, warn};

use super::{GameState, SessionError};
use crate::games::tictactoe::{Board, MoveError, MoveHistory, Outcome, Player};
use crate::stats::{GameOutcome, StatsStore};

/// One game between two named players; the first name plays `X`.
pub struct TwoPlayerSession<'s, S: StatsStore + ?Sized> {
    player_x: String,
    player_o: String,
    state: GameState,
    finished: Option<Outcome>,
    stats: &'s mut S,
}

impl<'s, S: StatsStore + ?Sized> TwoPlayerSession<'s, S> {
    /// Starts a game and registers both names with the statistics store.
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Stats`] if either name cannot be registered.
    #[instrument(skip(stats))]
    pub fn new(player_x: String, player_o: String, stats: &'s mut S) -> Result<Self, SessionError> {
        stats.ensure_registered(&player_x)?;
        stats.ensure_registered(&player_o)?;
        info!(%player_x, %player_o, "Two-player game started");
        Ok(Self {
            player_x,
            player_o,
            state: GameState::new(),
            finished: None,
            stats,
        })
    }

    /// Places the mark of the player to move at zero-based `(row, col)`.
    ///
    /// A winning or drawing move ends the game and reports a result for
    /// both players.
    ///
    /// # Errors
    ///
    /// [`SessionError::Move`] for an illegal cell or a finished game,
    /// [`SessionError::Stats`] if the results of a final move cannot be
    /// recorded. Neither result is kept, the move is taken back and the same
    /// player is still to move.
    #[instrument(skip(self), fields(to_move = %self.state.to_move()))]
    pub fn apply_move(&mut self, row: usize, col: usize) -> Result<Outcome, SessionError> {
        if self.finished.is_some() {
            return Err(MoveError::GameOver.into());
        }
        let outcome = self.state.apply_coords(row, col)?;
        if outcome.is_terminal() {
            if let Err(err) = self.finish(outcome) {
                warn!(%err, "Results not recorded, taking the final move back");
                self.state.undo(1)?;
                return Err(err);
            }
        }
        Ok(outcome)
    }

    /// Takes back exactly one move.
    ///
    /// # Errors
    ///
    /// [`SessionError::History`] with nothing to undo,
    /// [`SessionError::Move`] once the game is over.
    #[instrument(skip(self))]
    pub fn request_undo(&mut self) -> Result<(), SessionError> {
        if self.finished.is_some() {
            return Err(MoveError::GameOver.into());
        }
        self.state.undo(1)?;
        Ok(())
    }

    fn finish(&mut self, outcome: Outcome) -> Result<(), SessionError> {
        let results: Vec<(&str, GameOutcome)> = [(&self.player_x, Player::X), (&self.player_o, Player::O)]
            .into_iter()
            .filter_map(|(name, mark)| {
                GameOutcome::for_player(outcome, mark).map(|result| (name.as_str(), result))
            })
            .collect();
        self.stats.record_results(&results)?;
        self.finished = Some(outcome);
        info!(%outcome, moves = self.state.history().len(), "Game finished");
        Ok(())
    }

    /// Name of the player due to move.
    pub fn current_player_name(&self) -> &str {
        match self.state.to_move() {
            Player::X => &self.player_x,
            Player::O => &self.player_o,
        }
    }

    /// Mark of the player due to move.
    pub fn to_move(&self) -> Player {
        self.state.to_move()
    }

    /// Name of whoever plays `mark`.
    pub fn player_name(&self, mark: Player) -> &str {
        match mark {
            Player::X => &self.player_x,
            Player::O => &self.player_o,
        }
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        self.state.board()
    }

    /// Returns move history.
    pub fn history(&self) -> &MoveHistory {
        self.state.history()
    }

    /// Outcome derived from the board.
    pub fn outcome(&self) -> Outcome {
        self.state.outcome()
    }

    /// True once the result has been reported.
    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryStats;

    #[test]
    fn test_players_alternate() {
        let mut stats = MemoryStats::new();
        let mut session =
            TwoPlayerSession::new("Ann".to_string(), "Bo".to_string(), &mut stats).expect("Valid names");
        assert_eq!(session.current_player_name(), "Ann");
        session.apply_move(1, 1).expect("Valid move");
        assert_eq!(session.current_player_name(), "Bo");
        assert_eq!(session.to_move(), Player::O);
    }

    #[test]
    fn test_undo_removes_one_move() {
        let mut stats = MemoryStats::new();
        let mut session =
            TwoPlayerSession::new("Ann".to_string(), "Bo".to_string(), &mut stats).expect("Valid names");
        session.apply_move(1, 1).expect("Valid move");
        session.apply_move(0, 0).expect("Valid move");
        session.request_undo().expect("Enough history");
        assert_eq!(session.history().len(), 1);
        assert_eq!(session.current_player_name(), "Bo");
    }

    #[test]
    fn test_o_win_reported_for_both() {
        let mut stats = MemoryStats::new();
        {
            let mut session = TwoPlayerSession::new("Ann".to_string(), "Bo".to_string(), &mut stats)
                .expect("Valid names");
            // X: (0,0) (0,1) (2,2); O: (1,0) (1,1) (1,2)
            for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1), (2, 2)] {
                assert_eq!(session.apply_move(row, col).expect("Valid move"), Outcome::InProgress);
            }
            assert_eq!(session.apply_move(1, 2).expect("Valid move"), Outcome::OpponentWin);
            assert!(session.is_finished());
            assert!(matches!(
                session.apply_move(2, 0),
                Err(SessionError::Move(MoveError::GameOver))
            ));
        }
        let ann = stats.get("Ann").expect("Registered");
        let bo = stats.get("Bo").expect("Registered");
        assert_eq!((*ann.games_played(), *ann.games_lost()), (1, 1));
        assert_eq!((*bo.games_played(), *bo.games_won()), (1, 1));
    }
}
