//! Player statistics: per-name win/loss/draw tallies.

mod error;
mod models;
mod store;

pub use error::StatsError;
pub use models::{GameOutcome, PlayerStats};
pub use store::{JsonFileStats, MemoryStats, StatsStore};
