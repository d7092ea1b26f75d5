//! Human against the computer.

use rand::Rng;
use tracing::{debug, info, instrument, warn};

use super::{GameState, SessionError};
use crate::games::tictactoe::{Board, Difficulty, MoveError, MoveHistory, Outcome, Player, Position};
use crate::stats::{GameOutcome, StatsStore};

/// Where a single-player game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Waiting for the human (`X`).
    HumanToMove,
    /// Waiting for the computer (`O`).
    OpponentToMove,
    /// The computer has just won and the human may take the last pair back.
    RedoOffered,
    /// Game over; the result has been reported.
    Finished(Outcome),
}

/// One game between a named human playing `X` and the computer playing `O`.
pub struct SinglePlayerSession<'s, S: StatsStore + ?Sized, R: Rng> {
    player_name: String,
    difficulty: Difficulty,
    redo_enabled: bool,
    state: GameState,
    phase: SessionPhase,
    rng: R,
    stats: &'s mut S,
}

impl<'s, S: StatsStore + ?Sized, R: Rng> SinglePlayerSession<'s, S, R> {
    /// Starts a game and registers `player_name` with the statistics store.
    ///
    /// `redo_enabled` only has an effect at [`Difficulty::Impossible`].
    ///
    /// # Errors
    ///
    /// Returns [`SessionError::Stats`] if the name cannot be registered.
    #[instrument(skip(stats, rng))]
    pub fn new(
        player_name: String,
        difficulty: Difficulty,
        redo_enabled: bool,
        stats: &'s mut S,
        rng: R,
    ) -> Result<Self, SessionError> {
        stats.ensure_registered(&player_name)?;
        info!(player = %player_name, %difficulty, redo_enabled, "Single-player game started");
        Ok(Self {
            player_name,
            difficulty,
            redo_enabled,
            state: GameState::new(),
            phase: SessionPhase::HumanToMove,
            rng,
            stats,
        })
    }

    /// Applies the human's `X` at zero-based `(row, col)`.
    ///
    /// A winning or drawing move ends the game and reports the result.
    ///
    /// # Errors
    ///
    /// [`SessionError::Move`] for an illegal cell or a finished game,
    /// [`SessionError::NotHumansTurn`] while the computer is due,
    /// [`SessionError::RedoPending`] while a redo offer is open,
    /// [`SessionError::Stats`] if the result of a final move cannot be
    /// recorded. The move is taken back and the human is still to move.
    #[instrument(skip(self), fields(player = %self.player_name))]
    pub fn apply_human_move(&mut self, row: usize, col: usize) -> Result<Outcome, SessionError> {
        match self.phase {
            SessionPhase::HumanToMove => {}
            SessionPhase::OpponentToMove => return Err(SessionError::NotHumansTurn),
            SessionPhase::RedoOffered => return Err(SessionError::RedoPending),
            SessionPhase::Finished(_) => return Err(MoveError::GameOver.into()),
        }

        let outcome = self.state.apply_coords(row, col)?;
        if outcome.is_terminal() {
            self.finish_or_take_back(outcome)?;
        } else {
            self.phase = SessionPhase::OpponentToMove;
        }
        Ok(outcome)
    }

    /// Lets the computer choose and play its `O`.
    ///
    /// At [`Difficulty::Impossible`] with redo enabled, a winning computer
    /// move opens a redo offer instead of ending the game; the returned
    /// outcome is still [`Outcome::OpponentWin`].
    ///
    /// # Errors
    ///
    /// [`SessionError::NotOpponentsTurn`] while the human is due,
    /// [`SessionError::RedoPending`] while a redo offer is open,
    /// [`SessionError::Move`] once the game is over,
    /// [`SessionError::Stats`] if the result of a final move cannot be
    /// recorded. The move is taken back and the computer is still to move.
    #[instrument(skip(self), fields(difficulty = %self.difficulty))]
    pub fn apply_opponent_move(&mut self) -> Result<Outcome, SessionError> {
        match self.phase {
            SessionPhase::OpponentToMove => {}
            SessionPhase::HumanToMove => return Err(SessionError::NotOpponentsTurn),
            SessionPhase::RedoOffered => return Err(SessionError::RedoPending),
            SessionPhase::Finished(_) => return Err(MoveError::GameOver.into()),
        }

        let pos = self
            .difficulty
            .choose_move(self.state.board(), &mut self.rng)
            .ok_or(MoveError::GameOver)?;
        let outcome = self.state.apply(pos)?;
        debug!(%pos, %outcome, "Opponent moved");

        if outcome == Outcome::OpponentWin && self.redo_enabled && self.difficulty.supports_redo() {
            info!("Opponent won, offering redo");
            self.phase = SessionPhase::RedoOffered;
        } else if outcome.is_terminal() {
            self.finish_or_take_back(outcome)?;
        } else {
            self.phase = SessionPhase::HumanToMove;
        }
        Ok(outcome)
    }

    /// Takes back the most recent moves so the human can play again.
    ///
    /// With the computer's reply on the board, the reply and the human move
    /// before it are removed together. With only the human's move pending a
    /// reply, that single move is removed.
    ///
    /// # Errors
    ///
    /// [`SessionError::History`] with nothing to undo,
    /// [`SessionError::RedoPending`] while a redo offer is open,
    /// [`SessionError::Move`] once the game is over.
    #[instrument(skip(self), fields(moves = self.state.history().len()))]
    pub fn request_undo(&mut self) -> Result<(), SessionError> {
        match self.phase {
            SessionPhase::HumanToMove | SessionPhase::OpponentToMove => {}
            SessionPhase::RedoOffered => return Err(SessionError::RedoPending),
            SessionPhase::Finished(_) => return Err(MoveError::GameOver.into()),
        }

        let count = match self.state.history().last().map(|last| last.player) {
            Some(Player::O) => 2,
            _ => 1,
        };
        self.state.undo(count)?;
        self.phase = SessionPhase::HumanToMove;
        info!(count, "Moves undone");
        Ok(())
    }

    /// Accepts the redo offer: the computer's winning move and the human's
    /// move before it are undone and the human moves again.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoRedoOffered`] without an open offer.
    #[instrument(skip(self))]
    pub fn accept_redo(&mut self) -> Result<(), SessionError> {
        if self.phase != SessionPhase::RedoOffered {
            return Err(SessionError::NoRedoOffered);
        }
        self.state.undo(2)?;
        self.phase = SessionPhase::HumanToMove;
        info!("Redo accepted");
        Ok(())
    }

    /// Declines the redo offer; the computer's win stands and is reported.
    ///
    /// # Errors
    ///
    /// [`SessionError::NoRedoOffered`] without an open offer,
    /// [`SessionError::Stats`] if the result cannot be recorded. The offer
    /// stays open in that case.
    #[instrument(skip(self))]
    pub fn decline_redo(&mut self) -> Result<Outcome, SessionError> {
        if self.phase != SessionPhase::RedoOffered {
            return Err(SessionError::NoRedoOffered);
        }
        let outcome = self.state.outcome();
        self.finish(outcome)?;
        Ok(outcome)
    }

    /// Ends the game on the move just applied, or removes that move again if
    /// the result cannot be recorded.
    fn finish_or_take_back(&mut self, outcome: Outcome) -> Result<(), SessionError> {
        if let Err(err) = self.finish(outcome) {
            warn!(%err, "Result not recorded, taking the final move back");
            self.state.undo(1)?;
            return Err(err);
        }
        Ok(())
    }

    /// Reports the result and marks the game finished. The phase is left
    /// alone if the store refuses the result.
    fn finish(&mut self, outcome: Outcome) -> Result<(), SessionError> {
        let Some(result) = GameOutcome::for_player(outcome, Player::X) else {
            warn!(%outcome, "Finish requested for a game in progress");
            return Ok(());
        };
        self.stats.record_result(&self.player_name, result)?;
        self.phase = SessionPhase::Finished(outcome);
        info!(player = %self.player_name, ?result, moves = self.state.history().len(), "Game finished");
        Ok(())
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

    /// Current phase.
    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// The computer's most recent cell, if the last move was its.
    pub fn last_opponent_move(&self) -> Option<Position> {
        self.state
            .history()
            .last()
            .filter(|last| last.player == Player::O)
            .map(|last| last.position)
    }

    /// Human player's name.
    pub fn player_name(&self) -> &str {
        &self.player_name
    }

    /// Opponent strength.
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// True once the result has been reported.
    pub fn is_finished(&self) -> bool {
        matches!(self.phase, SessionPhase::Finished(_))
    }
}
