//! Tests for single- and two-player sessions.

use rand::SeedableRng;
use rand::rngs::StdRng;
use tic_tac_toe::{
    Board, Difficulty, GameState, HistoryError, MemoryStats, Outcome, Player, Position, SessionError,
    GameOutcome, PlayerStats, SessionPhase, SinglePlayerSession, StatsError, StatsStore,
    TwoPlayerSession,
};

/// Registers anyone but refuses every result.
#[derive(Default)]
struct RefusingStats {
    refused: usize,
}

impl StatsStore for RefusingStats {
    fn ensure_registered(&mut self, _name: &str) -> Result<(), StatsError> {
        Ok(())
    }

    fn record_result(&mut self, _name: &str, _outcome: GameOutcome) -> Result<(), StatsError> {
        self.refused += 1;
        Err(StatsError::new("Statistics unavailable"))
    }

    fn get(&self, _name: &str) -> Option<PlayerStats> {
        None
    }

    fn all(&self) -> Vec<PlayerStats> {
        Vec::new()
    }
}

fn impossible_session(stats: &mut MemoryStats) -> SinglePlayerSession<'_, MemoryStats, StdRng> {
    SinglePlayerSession::new(
        "Ann".to_string(),
        Difficulty::Impossible,
        true,
        stats,
        StdRng::seed_from_u64(1),
    )
    .expect("Valid name")
}

/// Human plays (0,0), (0,1), then blunders at (2,2); the computer answers
/// Center, TopRight, then wins on the anti-diagonal at BottomLeft.
fn play_into_loss<S: StatsStore>(session: &mut SinglePlayerSession<'_, S, StdRng>) -> Board {
    let mut before_blunder = Board::new();
    for (row, col) in [(0, 0), (0, 1), (2, 2)] {
        before_blunder = *session.board();
        assert_eq!(session.apply_human_move(row, col).expect("Valid move"), Outcome::InProgress);
        session.apply_opponent_move().expect("Opponent moves");
    }
    before_blunder
}

#[test]
fn test_accept_redo_after_computer_win() {
    let mut stats = MemoryStats::new();
    {
        let mut session = impossible_session(&mut stats);
        let before_blunder = play_into_loss(&mut session);

        assert_eq!(session.phase(), SessionPhase::RedoOffered);
        assert_eq!(session.outcome(), Outcome::OpponentWin);
        assert_eq!(session.last_opponent_move(), Some(Position::BottomLeft));
        assert_eq!(session.history().len(), 6);
        assert!(matches!(session.apply_human_move(1, 0), Err(SessionError::RedoPending)));

        session.accept_redo().expect("Redo offered");
        assert_eq!(session.history().len(), 4);
        assert_eq!(*session.board(), before_blunder);
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert_eq!(session.phase(), SessionPhase::HumanToMove);
        assert!(!session.is_finished());

        // Play continues: block the diagonal this time.
        assert_eq!(session.apply_human_move(2, 0).expect("Valid move"), Outcome::InProgress);
    }
    let record = stats.get("Ann").expect("Registered");
    assert_eq!(*record.games_played(), 0);
}

#[test]
fn test_declined_redo_reports_loss() {
    let mut stats = MemoryStats::new();
    {
        let mut session = impossible_session(&mut stats);
        play_into_loss(&mut session);
        assert_eq!(session.decline_redo().expect("Redo offered"), Outcome::OpponentWin);
        assert_eq!(session.phase(), SessionPhase::Finished(Outcome::OpponentWin));
        assert!(session.accept_redo().is_err());
    }
    let record = stats.get("Ann").expect("Registered");
    assert_eq!((*record.games_played(), *record.games_lost()), (1, 1));
}

#[test]
fn test_loss_without_redo_finishes_at_once() {
    let mut stats = MemoryStats::new();
    {
        let mut session = SinglePlayerSession::new(
            "Ann".to_string(),
            Difficulty::Impossible,
            false,
            &mut stats,
            StdRng::seed_from_u64(1),
        )
        .expect("Valid name");
        play_into_loss(&mut session);
        assert_eq!(session.phase(), SessionPhase::Finished(Outcome::OpponentWin));
    }
    assert_eq!(stats.get("Ann").map(|r| *r.games_lost()), Some(1));
}

#[test]
fn test_refused_result_takes_back_computer_win() {
    let mut stats = RefusingStats::default();
    {
        let mut session = SinglePlayerSession::new(
            "Ann".to_string(),
            Difficulty::Impossible,
            false,
            &mut stats,
            StdRng::seed_from_u64(1),
        )
        .expect("Valid name");
        for (row, col) in [(0, 0), (0, 1)] {
            session.apply_human_move(row, col).expect("Valid move");
            session.apply_opponent_move().expect("Opponent moves");
        }
        session.apply_human_move(2, 2).expect("Valid move");
        let before_reply = *session.board();

        assert!(matches!(session.apply_opponent_move(), Err(SessionError::Stats(_))));
        assert_eq!(session.phase(), SessionPhase::OpponentToMove);
        assert_eq!(session.history().len(), 5);
        assert_eq!(*session.board(), before_reply);
        assert_eq!(session.outcome(), Outcome::InProgress);
        assert!(!session.is_finished());

        // The same winning reply is tried again and refused again.
        assert!(matches!(session.apply_opponent_move(), Err(SessionError::Stats(_))));
        assert_eq!(session.history().len(), 5);
    }
    assert_eq!(stats.refused, 2);
}

#[test]
fn test_refused_result_keeps_redo_offer_open() {
    let mut stats = RefusingStats::default();
    let mut session = SinglePlayerSession::new(
        "Ann".to_string(),
        Difficulty::Impossible,
        true,
        &mut stats,
        StdRng::seed_from_u64(1),
    )
    .expect("Valid name");
    let before_blunder = play_into_loss(&mut session);

    assert!(matches!(session.decline_redo(), Err(SessionError::Stats(_))));
    assert_eq!(session.phase(), SessionPhase::RedoOffered);
    assert_eq!(session.history().len(), 6);

    session.accept_redo().expect("Redo still offered");
    assert_eq!(*session.board(), before_blunder);
}

#[test]
fn test_two_player_refused_result_takes_back_winning_move() {
    let mut stats = RefusingStats::default();
    let mut session =
        TwoPlayerSession::new("Ann".to_string(), "Bo".to_string(), &mut stats).expect("Valid names");
    for (row, col) in [(0, 0), (1, 0), (0, 1), (1, 1)] {
        session.apply_move(row, col).expect("Valid move");
    }

    assert!(matches!(session.apply_move(0, 2), Err(SessionError::Stats(_))));
    assert_eq!(session.history().len(), 4);
    assert_eq!(session.outcome(), Outcome::InProgress);
    assert!(!session.is_finished());
    assert_eq!(session.current_player_name(), "Ann");
    assert!(session.board().is_empty(Position::TopRight));
}

#[test]
fn test_history_replays_to_board_after_every_step() {
    let mut stats = MemoryStats::new();
    let mut session = SinglePlayerSession::new(
        "Ann".to_string(),
        Difficulty::Easy,
        false,
        &mut stats,
        StdRng::seed_from_u64(99),
    )
    .expect("Valid name");

    let mut step = 0;
    while !session.is_finished() {
        match session.phase() {
            SessionPhase::HumanToMove => {
                let pos = session.board().empty_positions()[0];
                session.apply_human_move(pos.row(), pos.col()).expect("Empty cell");
            }
            SessionPhase::OpponentToMove => {
                session.apply_opponent_move().expect("Opponent moves");
                // Exercise undo once mid-game, then replay the same cell.
                if step == 1 {
                    session.request_undo().expect("Enough history");
                }
                step += 1;
            }
            other => panic!("Unexpected phase {:?}", other),
        }
        let replayed = session.history().replay().expect("Consistent history");
        assert_eq!(replayed, *session.board());
    }
}

#[test]
fn test_game_state_undo_round_trip() {
    let mut state = GameState::new();
    state.apply(Position::TopLeft).expect("Valid move");
    state.apply(Position::Center).expect("Valid move");
    let snapshot = state.clone();

    state.apply(Position::BottomRight).expect("Valid move");
    state.apply(Position::TopRight).expect("Valid move");
    let undone = state.undo(2).expect("Enough history");

    assert_eq!(undone[0].position, Position::TopRight);
    assert_eq!(undone[1].position, Position::BottomRight);
    assert_eq!(state, snapshot);
    assert!(matches!(
        state.undo(3),
        Err(SessionError::History(HistoryError::InvalidUndoCount(3)))
    ));
    assert_eq!(state, snapshot);
}

#[test]
fn test_two_player_draw_reports_both() {
    let mut stats = MemoryStats::new();
    {
        let mut session =
            TwoPlayerSession::new("Ann".to_string(), "Bo".to_string(), &mut stats).expect("Valid names");
        // Ends as X O X / X O O / O X X.
        let moves = [(0, 0), (0, 1), (0, 2), (1, 1), (1, 0), (1, 2), (2, 1), (2, 0), (2, 2)];
        for (i, (row, col)) in moves.into_iter().enumerate() {
            let outcome = session.apply_move(row, col).expect("Valid move");
            if i < moves.len() - 1 {
                assert_eq!(outcome, Outcome::InProgress, "Move {}", i);
            } else {
                assert_eq!(outcome, Outcome::Draw);
            }
        }
        assert!(session.request_undo().is_err());
        assert_eq!(session.board().count(Player::X), 5);
    }
    for name in ["Ann", "Bo"] {
        let record = stats.get(name).expect("Registered");
        assert_eq!((*record.games_played(), *record.games_drawn()), (1, 1));
    }
}

#[test]
fn test_blank_name_rejected() {
    let mut stats = MemoryStats::new();
    let result = TwoPlayerSession::new("Ann".to_string(), " ".to_string(), &mut stats);
    assert!(matches!(result, Err(SessionError::Stats(_))));
}
