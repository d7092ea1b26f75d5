//! Menu loop and the interactive game loops it starts.

use std::io::{self, BufRead, Write};

use rand::Rng;
use strum::IntoEnumIterator;
use tracing::{info, instrument, warn};

use super::console::{Console, MoveInput};
use super::display::{single_player_message, stats_table, two_player_message};
use crate::games::tictactoe::{Difficulty, HistoryError, Outcome, Player};
use crate::session::{SessionError, SessionPhase, SinglePlayerSession, TwoPlayerSession};
use crate::stats::StatsStore;

/// True when `err` means the player closed input.
pub fn is_end_of_input(err: &anyhow::Error) -> bool {
    err.downcast_ref::<io::Error>()
        .is_some_and(|e| e.kind() == io::ErrorKind::UnexpectedEof)
}

/// Drives the main menu and the games started from it.
///
/// The statistics store is borrowed for the life of the menu; the RNG feeds
/// the computer opponent's random choices.
pub struct Menu<'s, R, W, S: StatsStore + ?Sized, G: Rng> {
    console: Console<R, W>,
    stats: &'s mut S,
    rng: G,
    default_difficulty: Difficulty,
}

impl<'s, R, W, S, G> Menu<'s, R, W, S, G>
where
    R: BufRead,
    W: Write,
    S: StatsStore + ?Sized,
    G: Rng,
{
    /// Creates a menu over `console`.
    pub fn new(console: Console<R, W>, stats: &'s mut S, rng: G, default_difficulty: Difficulty) -> Self {
        Self {
            console,
            stats,
            rng,
            default_difficulty,
        }
    }

    /// Returns the console, for inspecting scripted output.
    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Shows the main menu until the player exits or input ends.
    ///
    /// # Errors
    ///
    /// Output failures and unrecoverable session errors.
    #[instrument(skip(self))]
    pub fn run(&mut self) -> anyhow::Result<()> {
        match self.main_menu() {
            Err(e) if is_end_of_input(&e) => {
                info!("Input closed, leaving menu");
                Ok(())
            }
            other => other,
        }
    }

    fn main_menu(&mut self) -> anyhow::Result<()> {
        loop {
            self.console.clear()?;
            self.console.say("\n Tic-Tac-Toe Game  \n")?;
            self.console
                .say("--- Main Menu ---\n1. Play Game\n2. View Statistics\n3. Exit")?;
            match self.console.prompt_choice("Enter choice: ", 3)? {
                1 => self.game_type_menu()?,
                2 => self.show_stats()?,
                _ => {
                    self.console.say("Exiting game.")?;
                    return Ok(());
                }
            }
        }
    }

    fn game_type_menu(&mut self) -> anyhow::Result<()> {
        self.console
            .say("\n--- Select Game Type ---\n1. Single Player\n2. Multiplayer\n3. Back")?;
        match self.console.prompt_choice("Enter choice: ", 3)? {
            1 => {
                let difficulty = self.difficulty_menu()?;
                let redo_enabled = if difficulty.supports_redo() {
                    self.console
                        .prompt_yes_no("\nEnable undo in Impossible mode? (y/n): ")?
                } else {
                    false
                };
                let name = self.console.prompt_name("Enter your name: ")?;
                self.play_single(name, difficulty, redo_enabled)?;
                self.console.pause()?;
            }
            2 => {
                let player_x = self.console.prompt_name("Enter name of Player 1 'X': ")?;
                let player_o = self.console.prompt_name("Enter name of Player 2 'O': ")?;
                self.play_versus(player_x, player_o)?;
                self.console.pause()?;
            }
            _ => {}
        }
        Ok(())
    }

    fn difficulty_menu(&mut self) -> io::Result<Difficulty> {
        self.console.say("\n--- Select Difficulty ---")?;
        for difficulty in Difficulty::iter() {
            let marker = if difficulty == self.default_difficulty {
                " (default)"
            } else {
                ""
            };
            self.console
                .say(format!("{}. {}{}", difficulty.tier(), difficulty.label(), marker))?;
        }
        let choice = self.console.prompt_choice_or(
            "Enter choice: ",
            3,
            u32::from(self.default_difficulty.tier()),
        )?;
        Ok(Difficulty::iter()
            .find(|difficulty| u32::from(difficulty.tier()) == choice)
            .unwrap_or(self.default_difficulty))
    }

    /// Plays one game against the computer and returns its reported outcome.
    ///
    /// # Errors
    ///
    /// End of input, output failures, and session errors the player cannot
    /// recover from by retrying.
    #[instrument(skip(self))]
    pub fn play_single(
        &mut self,
        name: String,
        difficulty: Difficulty,
        redo_enabled: bool,
    ) -> anyhow::Result<Outcome> {
        let console = &mut self.console;
        let mut session =
            SinglePlayerSession::new(name, difficulty, redo_enabled, &mut *self.stats, &mut self.rng)?;
        console.clear()?;
        console.say(format!(
            "{} (X) vs computer (O), {} mode",
            session.player_name(),
            difficulty.label()
        ))?;

        loop {
            match session.phase() {
                SessionPhase::HumanToMove => {
                    console.say(format!("\n{}", session.board()))?;
                    let (row, col) = console.prompt_coords("Your move 'X' (row col): ")?;
                    match session.apply_human_move(row, col) {
                        Ok(_) => {}
                        Err(e) if e.is_recoverable() => {
                            warn!(%e, "Move rejected");
                            console.say("Invalid move. Try again.")?;
                        }
                        Err(e) => return Err(e.into()),
                    }
                }
                SessionPhase::OpponentToMove => {
                    let outcome = session.apply_opponent_move()?;
                    if let Some(pos) = session.last_opponent_move() {
                        console.say(format!("Computer move is ({}, {})", pos.row() + 1, pos.col() + 1))?;
                    }
                    if outcome == Outcome::InProgress && difficulty.offers_turn_undo() {
                        console.say(format!("\n{}", session.board()))?;
                        if console.prompt_yes_no("Undo move? (y/n): ")? {
                            match session.request_undo() {
                                Ok(()) => console.say("Last move undone.")?,
                                Err(SessionError::History(HistoryError::NothingToUndo { .. })) => {
                                    console.say("No moves to undo.")?
                                }
                                Err(e) => return Err(e.into()),
                            }
                        }
                    }
                }
                SessionPhase::RedoOffered => {
                    console.say(format!("\n{}", session.board()))?;
                    if console
                        .prompt_yes_no("Computer wins! Would you like to redo the last move? (y/n): ")?
                    {
                        session.accept_redo()?;
                        console.say("Redo applied. Your turn again.")?;
                    } else {
                        session.decline_redo()?;
                    }
                }
                SessionPhase::Finished(outcome) => {
                    console.say(format!("\n{}", session.board()))?;
                    console.say(single_player_message(outcome))?;
                    return Ok(outcome);
                }
            }
        }
    }

    /// Plays one game between two people and returns its reported outcome.
    ///
    /// Either player may enter `u` to take back the last move.
    ///
    /// # Errors
    ///
    /// End of input, output failures, and session errors the players cannot
    /// recover from by retrying.
    #[instrument(skip(self))]
    pub fn play_versus(&mut self, player_x: String, player_o: String) -> anyhow::Result<Outcome> {
        let console = &mut self.console;
        let mut session = TwoPlayerSession::new(player_x, player_o, &mut *self.stats)?;
        console.clear()?;

        loop {
            console.say(format!("\n{}", session.board()))?;
            let prompt = format!("{}'s move (row col, or u to undo): ", session.current_player_name());
            match console.prompt_move(&prompt)? {
                MoveInput::Undo => match session.request_undo() {
                    Ok(()) => console.say("Last move undone.")?,
                    Err(SessionError::History(HistoryError::NothingToUndo { .. })) => {
                        console.say("No moves to undo.")?
                    }
                    Err(e) => return Err(e.into()),
                },
                MoveInput::Cell(row, col) => match session.apply_move(row, col) {
                    Ok(outcome) if outcome.is_terminal() => {
                        console.say(format!("\n{}", session.board()))?;
                        console.say(two_player_message(
                            outcome,
                            session.player_name(Player::X),
                            session.player_name(Player::O),
                        ))?;
                        return Ok(outcome);
                    }
                    Ok(_) => {}
                    Err(e) if e.is_recoverable() => {
                        warn!(%e, "Move rejected");
                        console.say("Invalid move. Try again.")?;
                    }
                    Err(e) => return Err(e.into()),
                },
            }
        }
    }

    /// Shows every player's record.
    ///
    /// # Errors
    ///
    /// Output failures.
    pub fn show_stats(&mut self) -> anyhow::Result<()> {
        self.console.clear()?;
        let records = self.stats.all();
        self.console.say(stats_table(&records))?;
        self.console.pause()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::MemoryStats;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::io::Cursor;

    type ScriptedMenu<'s> = Menu<'s, Cursor<Vec<u8>>, Vec<u8>, MemoryStats, StdRng>;

    fn menu<'s>(stats: &'s mut MemoryStats, script: &str) -> ScriptedMenu<'s> {
        let console = Console::new(Cursor::new(script.as_bytes().to_vec()), Vec::new()).without_clearing();
        Menu::new(console, stats, StdRng::seed_from_u64(21), Difficulty::Easy)
    }

    fn output(menu: ScriptedMenu<'_>) -> String {
        String::from_utf8(menu.into_console().into_output()).expect("UTF-8 output")
    }

    #[test]
    fn test_stats_then_exit() {
        let mut stats = MemoryStats::new();
        stats.ensure_registered("Ann").expect("Valid name");
        let mut menu = menu(&mut stats, "2\n\n3\n");
        menu.run().expect("Menu runs");
        let text = output(menu);
        assert!(text.contains("--- Player Statistics ---"));
        assert!(text.contains("Player: Ann"));
        assert!(text.contains("Exiting game."));
    }

    #[test]
    fn test_versus_from_menu() {
        let mut stats = MemoryStats::new();
        let script = "1\n2\nAnn\nBo\n1 1\n2 1\n1 1\n1 2\n2 2\n1 3\n\n3\n";
        let mut menu = menu(&mut stats, script);
        menu.run().expect("Menu runs");
        let text = output(menu);
        assert!(text.contains("Invalid move. Try again."));
        assert!(text.contains("Player 1 (Ann) wins!"));

        assert_eq!(stats.get("Ann").map(|r| *r.games_won()), Some(1));
        assert_eq!(stats.get("Bo").map(|r| *r.games_lost()), Some(1));
    }

    #[test]
    fn test_versus_undo() {
        let mut stats = MemoryStats::new();
        let script = "u\n2 2\nu\n1 1\n1 2\n2 1\n2 2\n3 1\n1 3\n3 3\n";
        let mut menu = menu(&mut stats, script);
        let outcome = menu
            .play_versus("Ann".to_string(), "Bo".to_string())
            .expect("Game completes");
        // Ann: (1,1) (2,1) (3,1) after the undo; Bo never completes a line.
        assert_eq!(outcome, Outcome::PlayerWin);
        let text = output(menu);
        assert!(text.contains("No moves to undo."));
        assert!(text.contains("Last move undone."));
    }

    #[test]
    fn test_impossible_game_is_never_won() {
        let mut stats = MemoryStats::new();
        let cells = "1 1\n1 2\n1 3\n2 1\n2 2\n2 3\n3 1\n3 2\n3 3\n";
        let mut menu = menu(&mut stats, &cells.repeat(5));
        let outcome = menu
            .play_single("Ann".to_string(), Difficulty::Impossible, false)
            .expect("Game completes");
        assert_ne!(outcome, Outcome::PlayerWin);
        drop(menu);

        let record = stats.get("Ann").expect("Registered");
        assert_eq!(*record.games_played(), 1);
        assert_eq!(*record.games_won(), 0);
    }

    #[test]
    fn test_easy_undo_prompt_takes_back_both_moves() {
        let mut stats = MemoryStats::new();
        let mut menu = menu(&mut stats, "1 1\ny\n");
        let err = menu
            .play_single("Ann".to_string(), Difficulty::Easy, false)
            .expect_err("Input ends after the undo");
        assert!(is_end_of_input(&err));

        let text = output(menu);
        assert!(text.contains("Computer move is ("));
        assert!(text.contains("Undo move? (y/n): "));
        let (_, after_undo) = text.split_once("Last move undone.").expect("Undo confirmed");
        let empty_board = "   |   |   \n---+---+---\n   |   |   \n---+---+---\n   |   |   \n";
        assert!(after_undo.contains(empty_board));
        assert!(after_undo.contains("Your move 'X' (row col): "));
        assert_eq!(stats.get("Ann").map(|r| *r.games_played()), Some(0));
    }

    #[test]
    fn test_end_of_input_mid_game_records_nothing() {
        let mut stats = MemoryStats::new();
        let mut menu = menu(&mut stats, "1\n2\nAnn\nBo\n2 2\n");
        menu.run().expect("Closed input ends the menu quietly");
        drop(menu);
        assert_eq!(stats.get("Ann").map(|r| *r.games_played()), Some(0));
    }
}
