//! Per-mode result history
//!
//! Append-only time series of round results, persisted as one nested JSON
//! document: `{ mode: { "<unixSeconds>": { metric: value } } }`. Every append
//! rewrites the whole file (pretty-printed). Writes are not atomic; a crash
//! mid-write can corrupt the store, and loads treat that as an empty history
//! rather than an error.

use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Metric name -> value for one finished round
pub type RoundMetrics = BTreeMap<String, f64>;

type ModeSeries = BTreeMap<u64, RoundMetrics>;

/// Append-only store of every finished round, keyed by mode then timestamp
#[derive(Debug)]
pub struct History {
    path: PathBuf,
    records: BTreeMap<String, ModeSeries>,
}

impl History {
    /// Load the persisted history; a missing or unreadable file is an
    /// empty history, never an error.
    pub fn load(path: &Path) -> Self {
        let records = match fs::read_to_string(path) {
            Ok(text) => match serde_json::from_str(&text) {
                Ok(records) => {
                    log::info!("loaded history from {}", path.display());
                    records
                }
                Err(e) => {
                    log::warn!("unreadable history at {}: {e}; starting empty", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) => {
                log::info!("no history at {}: {e}; starting empty", path.display());
                BTreeMap::new()
            }
        };
        Self {
            path: path.to_path_buf(),
            records,
        }
    }

    /// In-memory store that never persists; for headless runs
    pub fn ephemeral() -> Self {
        Self {
            path: PathBuf::new(),
            records: BTreeMap::new(),
        }
    }

    /// Record one round's metrics under `at_secs` and rewrite the file.
    ///
    /// Timestamp keys are whole seconds; two rounds finishing within the
    /// same second would collide, so the key advances to the next vacant
    /// second instead of silently overwriting the earlier round.
    pub fn append(&mut self, mode: &str, at_secs: u64, metrics: RoundMetrics) {
        let series = self.records.entry(mode.to_string()).or_default();
        let mut key = at_secs;
        while series.contains_key(&key) {
            key += 1;
        }
        series.insert(key, metrics);

        if let Err(e) = self.save() {
            log::error!("failed to persist history: {e}");
        }
    }

    /// One metric's series for a mode, ascending by timestamp. Rounds that
    /// never recorded the metric are skipped.
    pub fn select_series(&self, mode: &str, metric: &str) -> Vec<(u64, f64)> {
        let Some(series) = self.records.get(mode) else {
            return Vec::new();
        };
        series
            .iter()
            .filter_map(|(&at, metrics)| metrics.get(metric).map(|&v| (at, v)))
            .collect()
    }

    /// Union of every metric name ever recorded for a mode
    pub fn available_metrics(&self, mode: &str) -> BTreeSet<String> {
        self.records
            .get(mode)
            .map(|series| series.values().flat_map(|m| m.keys().cloned()).collect())
            .unwrap_or_default()
    }

    /// Rewrite the whole document, pretty-printed
    pub fn save(&self) -> io::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Ok(());
        }
        let json = serde_json::to_string_pretty(&self.records)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        fs::write(&self.path, json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("aim_arena_history_{name}"))
    }

    fn metrics(pairs: &[(&str, f64)]) -> RoundMetrics {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_append_then_reload_round_trips() {
        let path = scratch("round_trip");
        let _ = fs::remove_file(&path);

        let mut history = History::load(&path);
        history.append("Arcade", 1_700_000_000, metrics(&[("Hits", 10.0)]));

        let reloaded = History::load(&path);
        assert_eq!(
            reloaded.select_series("Arcade", "Hits"),
            vec![(1_700_000_000, 10.0)]
        );

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_series_sorted_by_timestamp() {
        let mut history = History::ephemeral();
        history.append("AWP", 300, metrics(&[("Accuracy", 80.0)]));
        history.append("AWP", 100, metrics(&[("Accuracy", 60.0)]));
        history.append("AWP", 200, metrics(&[("Accuracy", 70.0)]));

        assert_eq!(
            history.select_series("AWP", "Accuracy"),
            vec![(100, 60.0), (200, 70.0), (300, 80.0)]
        );
    }

    #[test]
    fn test_same_second_appends_both_survive() {
        let mut history = History::ephemeral();
        history.append("Arcade", 500, metrics(&[("Hits", 1.0)]));
        history.append("Arcade", 500, metrics(&[("Hits", 2.0)]));

        assert_eq!(
            history.select_series("Arcade", "Hits"),
            vec![(500, 1.0), (501, 2.0)]
        );
    }

    #[test]
    fn test_select_skips_rounds_without_metric() {
        let mut history = History::ephemeral();
        history.append("Arcade", 100, metrics(&[("Hits", 5.0)]));
        history.append("Arcade", 200, metrics(&[("Accuracy", 90.0)]));

        assert_eq!(history.select_series("Arcade", "Hits"), vec![(100, 5.0)]);
        assert!(history.select_series("Arcade", "Misses").is_empty());
        assert!(history.select_series("Unknown", "Hits").is_empty());
    }

    #[test]
    fn test_available_metrics_is_union() {
        let mut history = History::ephemeral();
        history.append("Arcade", 100, metrics(&[("Hits", 5.0), ("Time", 30.0)]));
        history.append("Arcade", 200, metrics(&[("Accuracy", 90.0)]));

        let names = history.available_metrics("Arcade");
        assert_eq!(
            names.into_iter().collect::<Vec<_>>(),
            vec!["Accuracy", "Hits", "Time"]
        );
        assert!(history.available_metrics("AWP").is_empty());
    }

    #[test]
    fn test_corrupt_file_loads_empty() {
        let path = scratch("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let history = History::load(&path);
        assert!(history.available_metrics("Arcade").is_empty());

        let _ = fs::remove_file(&path);
    }
}
