//! On-disk persistence for monitor state.
//!
//! State lives in a single pretty-printed JSON file inside the data
//! directory, `~/.teamwatch` by default. Loading is forgiving: a
//! missing file is a normal first run, and a malformed one is reported
//! as a warning while the monitor starts fresh.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use teamwatch_engine::{CoherenceMonitor, PersistedState};
use tracing::warn;

/// File name of the persisted state inside the data directory.
pub const STATE_FILE: &str = "monitor_data.json";

/// Default data directory, `~/.teamwatch`.
pub fn default_data_dir() -> PathBuf {
    home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".teamwatch")
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}

/// Reads and writes monitor state under one data directory.
#[derive(Debug)]
pub struct Store {
    data_dir: PathBuf,
}

impl Store {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Path of the state file.
    pub fn path(&self) -> PathBuf {
        self.data_dir.join(STATE_FILE)
    }

    /// Load a monitor, falling back to a fresh one when the file is
    /// missing or unreadable.
    pub fn load(&self) -> CoherenceMonitor {
        match self.try_load() {
            Ok(Some(state)) => {
                let mut monitor = CoherenceMonitor::new();
                monitor.restore(state);
                monitor
            }
            Ok(None) => CoherenceMonitor::new(),
            Err(err) => {
                warn!(error = %err, "could not load persisted state");
                eprintln!("[!] Warning: Could not load data: {:#}", err);
                CoherenceMonitor::new()
            }
        }
    }

    /// Read the persisted state, `None` when no file exists yet.
    pub fn try_load(&self) -> Result<Option<PersistedState>> {
        let path = self.path();
        if !path.exists() {
            return Ok(None);
        }
        let raw =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let state =
            serde_json::from_str(&raw).with_context(|| format!("parsing {}", path.display()))?;
        Ok(Some(state))
    }

    /// Persist the monitor's durable state, creating the data
    /// directory if needed.
    pub fn save(&self, monitor: &CoherenceMonitor) -> Result<()> {
        fs::create_dir_all(&self.data_dir)
            .with_context(|| format!("creating {}", self.data_dir.display()))?;
        let json = serde_json::to_string_pretty(&monitor.persisted_state())?;
        let path = self.path();
        fs::write(&path, json).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_loads_a_fresh_monitor() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let monitor = store.load();
        assert_eq!(monitor.agent_count(), 0);
        assert!(store.try_load().unwrap().is_none());
    }

    #[test]
    fn save_then_load_round_trips_agents() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let mut monitor = CoherenceMonitor::new();
        monitor.record_mention("forge", true);
        monitor.record_response("forge", 2.5);
        store.save(&monitor).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.agent_count(), 1);
        assert_eq!(loaded.agent("FORGE"), monitor.agent("FORGE"));
    }

    #[test]
    fn save_creates_nested_data_dir() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path().join("deep").join("nested"));

        store.save(&CoherenceMonitor::new()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn malformed_file_falls_back_to_fresh_state() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());
        fs::create_dir_all(dir.path()).unwrap();
        fs::write(store.path(), "{not json at all").unwrap();

        assert!(store.try_load().is_err());
        let monitor = store.load();
        assert_eq!(monitor.agent_count(), 0);
    }

    #[test]
    fn persisted_file_is_pretty_printed_json() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let mut monitor = CoherenceMonitor::new();
        monitor.register_agent("FORGE");
        store.save(&monitor).unwrap();

        let raw = fs::read_to_string(store.path()).unwrap();
        assert!(raw.contains("\"agents\""));
        assert!(raw.contains("\"saved_at\""));
        assert!(raw.contains('\n'));
    }

    #[test]
    fn saved_thresholds_are_restored() {
        let dir = tempdir().unwrap();
        let store = Store::new(dir.path());

        let monitor = CoherenceMonitor::with_thresholds(teamwatch_types::Thresholds {
            latency_critical: 15.0,
            ..Default::default()
        });
        store.save(&monitor).unwrap();

        let loaded = store.load();
        assert_eq!(loaded.thresholds().latency_critical, 15.0);
    }
}
