//! Tic-tac-toe - terminal front end
//!
//! Menu-driven play against the computer or a second person, with
//! statistics kept in a JSON file.

#![warn(missing_docs)]

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tic_tac_toe::cli::{Cli, Command};
use tic_tac_toe::terminal::{Console, Menu, is_end_of_input};
use tic_tac_toe::{GameConfig, JsonFileStats};
use tracing::{info, instrument};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    initialize_tracing(config.log_filter());

    let mut stats = JsonFileStats::open(config.stats_path())?;
    let seed = config.seed().unwrap_or_else(|| rand::rng().random());
    info!(seed, stats_path = %stats.path().display(), "Starting tic-tac-toe");

    let mut console = Console::new(io::stdin().lock(), io::stdout());
    if !io::stdout().is_terminal() {
        console = console.without_clearing();
    }
    let mut menu = Menu::new(
        console,
        &mut stats,
        StdRng::seed_from_u64(seed),
        *config.default_difficulty(),
    );

    let result = match cli.command.unwrap_or(Command::Menu) {
        Command::Menu => menu.run(),
        Command::Play {
            difficulty,
            name,
            redo,
        } => menu
            .play_single(
                name,
                difficulty.unwrap_or(*config.default_difficulty()),
                redo || *config.redo_enabled(),
            )
            .map(|_| ()),
        Command::Versus { x, o } => menu.play_versus(x, o).map(|_| ()),
        Command::Stats => menu.show_stats(),
    };

    match result {
        Err(e) if is_end_of_input(&e) => {
            info!("Input closed");
            Ok(())
        }
        other => other,
    }
}

/// Reads the config file and applies command-line overrides.
#[instrument(skip_all, fields(config_path = %cli.config.display()))]
fn load_config(cli: &Cli) -> Result<GameConfig> {
    let mut config = GameConfig::load_or_default(&cli.config)?;
    if let Some(path) = &cli.stats {
        config = config.with_stats_path(path.clone());
    }
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    Ok(config)
}

/// Logs go to stderr so prompts on stdout stay readable.
fn initialize_tracing(default_filter: &str) {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}
