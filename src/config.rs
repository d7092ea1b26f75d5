//! Game configuration loaded from TOML.

use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument};

use crate::games::tictactoe::Difficulty;

/// Front-end settings. Every field has a default, so an empty file is valid.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// JSON file holding player statistics.
    stats_path: PathBuf,

    /// Strength preselected in the difficulty menu and used by `play`.
    default_difficulty: Difficulty,

    /// Whether Impossible-mode games offer redo after a computer win.
    redo_enabled: bool,

    /// Fixed seed for the opponent's random choices.
    seed: Option<u64>,

    /// Tracing filter used when `RUST_LOG` is unset.
    log_filter: String,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            stats_path: default_stats_path(),
            default_difficulty: Difficulty::default(),
            redo_enabled: false,
            seed: None,
            log_filter: default_log_filter(),
        }
    }
}

fn default_stats_path() -> PathBuf {
    PathBuf::from("tic_tac_toe_stats.json")
}

fn default_log_filter() -> String {
    "warn,tic_tac_toe=info".to_string()
}

impl GameConfig {
    /// Loads configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        debug!("Loading config from file");
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::new(format!("Failed to read config file: {}", e)))?;
        let config = Self::from_toml(&content)?;
        info!(stats_path = %config.stats_path.display(), "Config loaded successfully");
        Ok(config)
    }

    /// Like [`GameConfig::from_file`], but a missing file yields defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        match std::fs::metadata(path.as_ref()) {
            Ok(_) => Self::from_file(path),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(ConfigError::new(format!("Failed to inspect config file: {}", e))),
        }
    }

    /// Parses configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] on malformed TOML or unknown values.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::new(format!("Failed to parse config: {}", e)))
    }

    /// Replaces the statistics file location.
    pub fn with_stats_path(mut self, path: PathBuf) -> Self {
        self.stats_path = path;
        self
    }

    /// Replaces the RNG seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Configuration error.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
