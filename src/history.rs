/// Historical statistics lookup
///
/// This module handles:
/// - The `StatsStore` seam the exporter queries for a player pair
/// - A JSON file store of previously recorded statistics
///
/// The exporter only reads from a store; nothing here writes.
use crate::report::StatisticsContext;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

pub trait StatsStore {
    /// Statistics recorded for `player0` against `player1`, oriented that way
    fn lookup(&self, player0: &str, player1: &str) -> Option<StatisticsContext>;
}

/// One stored player pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredPair {
    pub player0: String,
    pub player1: String,
    pub stats: StatisticsContext,
}

/// Statistics read from a JSON array of [`StoredPair`] entries
#[derive(Debug, Clone, Default)]
pub struct JsonStatsStore {
    entries: Vec<StoredPair>,
}

impl JsonStatsStore {
    pub fn from_entries(entries: Vec<StoredPair>) -> Self {
        Self { entries }
    }

    pub fn load(path: &Path) -> Result<Self, String> {
        let text = fs::read_to_string(path)
            .map_err(|e| format!("Failed to read statistics store {}: {}", path.display(), e))?;
        let entries: Vec<StoredPair> = serde_json::from_str(&text)
            .map_err(|e| format!("Failed to parse statistics store {}: {}", path.display(), e))?;
        debug!("Loaded {} player pairs from {:?}", entries.len(), path);
        Ok(Self { entries })
    }

    /// Load a store, treating any failure as an empty store
    pub fn open(path: &Path) -> Self {
        match Self::load(path) {
            Ok(store) => store,
            Err(e) => {
                warn!("{}; continuing without historical statistics", e);
                Self::default()
            }
        }
    }
}

impl StatsStore for JsonStatsStore {
    fn lookup(&self, player0: &str, player1: &str) -> Option<StatisticsContext> {
        self.entries.iter().find_map(|entry| {
            if entry.player0 == player0 && entry.player1 == player1 {
                Some(entry.stats)
            } else if entry.player0 == player1 && entry.player1 == player0 {
                Some(entry.stats.swapped())
            } else {
                None
            }
        })
    }
}
