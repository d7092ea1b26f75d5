//! Text for boards, results and the statistics table.

use std::fmt::Write;

use crate::games::tictactoe::{Outcome, Player};
use crate::stats::PlayerStats;

/// Statistics screen body, one block per player.
pub fn stats_table(records: &[PlayerStats]) -> String {
    let mut text = String::from("--- Player Statistics ---\n");
    if records.is_empty() {
        text.push_str("No games recorded yet.\n");
        return text;
    }
    for record in records {
        // Writing to a String cannot fail.
        let _ = writeln!(
            text,
            "Player: {}\nGames Played: {}, Won: {}, Lost: {}, Drawn: {}\nWin Percentage: {:.2}%\n",
            record.name(),
            record.games_played(),
            record.games_won(),
            record.games_lost(),
            record.games_drawn(),
            record.win_percentage()
        );
    }
    text
}

/// End-of-game line for the human in a single-player game.
pub fn single_player_message(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::PlayerWin => "Congratulations, you won!",
        Outcome::OpponentWin => "You lost!",
        Outcome::Draw => "It's a draw.",
        Outcome::InProgress => "Game in progress.",
    }
}

/// End-of-game line for a two-player game.
pub fn two_player_message(outcome: Outcome, player_x: &str, player_o: &str) -> String {
    match outcome.winner() {
        Some(Player::X) => format!("Player 1 ({}) wins!", player_x),
        Some(Player::O) => format!("Player 2 ({}) wins!", player_o),
        None if outcome.is_draw() => "It's a draw.".to_string(),
        None => "Game in progress.".to_string(),
    }
}
