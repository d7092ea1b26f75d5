//! Statistics stores.

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};

use super::{GameOutcome, PlayerStats, StatsError};

/// Keyed aggregate of per-player results.
pub trait StatsStore {
    /// Creates a zeroed record for `name` if none exists.
    fn ensure_registered(&mut self, name: &str) -> Result<(), StatsError>;

    /// Counts one finished game for `name`, registering the name if needed.
    fn record_result(&mut self, name: &str, outcome: GameOutcome) -> Result<(), StatsError>;

    /// Counts one game for each `(name, outcome)` pair. Either every result
    /// is kept or, on error, none is.
    ///
    /// The default records the pairs one at a time and is only all-or-nothing
    /// for stores whose `record_result` cannot fail after validating the name.
    fn record_results(&mut self, results: &[(&str, GameOutcome)]) -> Result<(), StatsError> {
        for (name, outcome) in results {
            self.record_result(name, *outcome)?;
        }
        Ok(())
    }

    /// Returns the record for `name`.
    fn get(&self, name: &str) -> Option<PlayerStats>;

    /// All records, ordered by name.
    fn all(&self) -> Vec<PlayerStats>;
}

fn validate_name(name: &str) -> Result<(), StatsError> {
    if name.trim().is_empty() {
        return Err(StatsError::new("Player name must not be empty"));
    }
    Ok(())
}

/// In-process store; tallies last for the life of the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStats {
    records: BTreeMap<String, PlayerStats>,
}

impl MemoryStats {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn from_records(records: Vec<PlayerStats>) -> Self {
        Self {
            records: records
                .into_iter()
                .map(|record| (record.name().clone(), record))
                .collect(),
        }
    }
}

impl StatsStore for MemoryStats {
    #[instrument(skip(self))]
    fn ensure_registered(&mut self, name: &str) -> Result<(), StatsError> {
        validate_name(name)?;
        if !self.records.contains_key(name) {
            info!(name, "Registering player");
            self.records.insert(name.to_string(), PlayerStats::new(name));
        }
        Ok(())
    }

    #[instrument(skip(self))]
    fn record_result(&mut self, name: &str, outcome: GameOutcome) -> Result<(), StatsError> {
        self.ensure_registered(name)?;
        let record = self
            .records
            .get_mut(name)
            .ok_or_else(|| StatsError::new(format!("Player '{}' vanished after registration", name)))?;
        record.record(outcome);
        debug!(
            name,
            played = record.games_played(),
            won = record.games_won(),
            "Result recorded"
        );
        Ok(())
    }

    #[instrument(skip(self, results), fields(count = results.len()))]
    fn record_results(&mut self, results: &[(&str, GameOutcome)]) -> Result<(), StatsError> {
        for (name, _) in results {
            validate_name(name)?;
        }
        for (name, outcome) in results {
            self.record_result(name, *outcome)?;
        }
        Ok(())
    }

    fn get(&self, name: &str) -> Option<PlayerStats> {
        self.records.get(name).cloned()
    }

    fn all(&self) -> Vec<PlayerStats> {
        self.records.values().cloned().collect()
    }
}

/// [`MemoryStats`] persisted to a JSON file after every change.
///
/// A change is kept in memory only once the file has been written, so a
/// failed write leaves both as they were.
#[derive(Debug, Clone)]
pub struct JsonFileStats {
    path: PathBuf,
    inner: MemoryStats,
}

impl JsonFileStats {
    /// Opens the store at `path`. A missing file is an empty store.
    ///
    /// # Errors
    ///
    /// Returns [`StatsError`] if the file exists but cannot be read or parsed.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StatsError> {
        let path = path.as_ref().to_path_buf();
        let inner = match std::fs::read_to_string(&path) {
            Ok(content) => {
                let records: Vec<PlayerStats> = serde_json::from_str(&content)?;
                info!(count = records.len(), "Statistics loaded");
                MemoryStats::from_records(records)
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                info!("No statistics file yet, starting empty");
                MemoryStats::new()
            }
            Err(err) => return Err(err.into()),
        };
        Ok(Self { path, inner })
    }

    /// Location of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the records, writes the copy and only
    /// then replaces the records with it.
    #[instrument(skip(self, change), fields(path = %self.path.display()))]
    fn commit(
        &mut self,
        change: impl FnOnce(&mut MemoryStats) -> Result<(), StatsError>,
    ) -> Result<(), StatsError> {
        let mut updated = self.inner.clone();
        change(&mut updated)?;
        let content = serde_json::to_string_pretty(&updated.all())?;
        if let Err(err) = std::fs::write(&self.path, content) {
            warn!(%err, "Statistics not saved, change discarded");
            return Err(err.into());
        }
        self.inner = updated;
        debug!("Statistics saved");
        Ok(())
    }
}

impl StatsStore for JsonFileStats {
    fn ensure_registered(&mut self, name: &str) -> Result<(), StatsError> {
        if self.inner.get(name).is_some() {
            return Ok(());
        }
        self.commit(|records| records.ensure_registered(name))
    }

    fn record_result(&mut self, name: &str, outcome: GameOutcome) -> Result<(), StatsError> {
        self.commit(|records| records.record_result(name, outcome))
    }

    fn record_results(&mut self, results: &[(&str, GameOutcome)]) -> Result<(), StatsError> {
        self.commit(|records| records.record_results(results))
    }

    fn get(&self, name: &str) -> Option<PlayerStats> {
        self.inner.get(name)
    }

    fn all(&self) -> Vec<PlayerStats> {
        self.inner.all()
    }
}
