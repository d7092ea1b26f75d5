//! Command-line interface for tic_tac_toe.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::games::tictactoe::Difficulty;

/// Tic-tac-toe against a friend or a computer opponent
#[derive(Parser, Debug)]
#[command(name = "tic_tac_toe")]
#[command(about = "Terminal tic-tac-toe with three opponent strengths", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "tic_tac_toe.toml")]
    pub config: PathBuf,

    /// Statistics file, overriding the configured one
    #[arg(long)]
    pub stats: Option<PathBuf>,

    /// Seed for the opponent's random choices
    #[arg(long)]
    pub seed: Option<u64>,

    /// Subcommand to run (defaults to the interactive menu)
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Interactive menu
    Menu,

    /// One game against the computer
    Play {
        /// Opponent strength (defaults to the configured one)
        #[arg(short, long, value_enum)]
        difficulty: Option<Difficulty>,

        /// Your name, as recorded in the statistics
        #[arg(short, long)]
        name: String,

        /// Offer redo after an Impossible-mode loss
        #[arg(long)]
        redo: bool,
    },

    /// One game between two people at the same terminal
    Versus {
        /// Name of the player using X (moves first)
        #[arg(long)]
        x: String,

        /// Name of the player using O
        #[arg(long)]
        o: String,
    },

    /// Print the statistics table
    Stats,
}
