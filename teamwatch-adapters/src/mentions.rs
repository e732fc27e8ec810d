//! Importer for mention tracker exports.
//!
//! Mention trackers record who was addressed in team channels and
//! whether the mention was picked up. Each event maps to one
//! `record_mention` call against the named agent.
//!
//! ## Example
//!
//! ```rust
//! use teamwatch_adapters::mentions::import_mentions_json;
//! use teamwatch_engine::CoherenceMonitor;
//!
//! let mut monitor = CoherenceMonitor::new();
//! let json = r#"{"events": [{"agent": "forge", "acknowledged": true}]}"#;
//!
//! let count = import_mentions_json(&mut monitor, json).unwrap();
//! assert_eq!(count, 1);
//! assert_eq!(monitor.agent("FORGE").unwrap().mentions_acknowledged, 1);
//! ```

use serde::Deserialize;
use teamwatch_engine::CoherenceMonitor;

use crate::AdapterError;

/// One mention event from a tracker export.
#[derive(Debug, Clone, Deserialize)]
pub struct MentionEvent {
    /// Mentioned agent. Events without one are skipped.
    #[serde(default)]
    pub agent: Option<String>,

    /// Whether the mention was acknowledged.
    #[serde(default)]
    pub acknowledged: bool,
}

/// Top-level mention tracker export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MentionExport {
    #[serde(default)]
    pub events: Vec<MentionEvent>,
}

/// Apply a mention export, returning the number of events consumed.
///
/// Events missing an agent name, or naming an empty one, are skipped
/// and do not count.
pub fn import_mentions(monitor: &mut CoherenceMonitor, export: &MentionExport) -> usize {
    let mut count = 0;
    for event in &export.events {
        let agent = match event.agent.as_deref() {
            Some(agent) if !agent.is_empty() => agent,
            _ => continue,
        };
        monitor.record_mention(agent, event.acknowledged);
        count += 1;
    }
    count
}

/// Parse a raw JSON export and apply it.
pub fn import_mentions_json(
    monitor: &mut CoherenceMonitor,
    json: &str,
) -> Result<usize, AdapterError> {
    let export: MentionExport = serde_json::from_str(json)?;
    Ok(import_mentions(monitor, &export))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn imports_each_named_event() {
        let mut monitor = CoherenceMonitor::new();
        let export = MentionExport {
            events: vec![
                MentionEvent { agent: Some("forge".into()), acknowledged: true },
                MentionEvent { agent: Some("forge".into()), acknowledged: false },
                MentionEvent { agent: Some("atlas".into()), acknowledged: true },
            ],
        };

        assert_eq!(import_mentions(&mut monitor, &export), 3);
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.mentions_received, 2);
        assert_eq!(forge.mentions_acknowledged, 1);
        assert_eq!(monitor.agent("ATLAS").unwrap().mentions_acknowledged, 1);
    }

    #[test]
    fn skips_events_without_an_agent() {
        let mut monitor = CoherenceMonitor::new();
        let export = MentionExport {
            events: vec![
                MentionEvent { agent: None, acknowledged: true },
                MentionEvent { agent: Some(String::new()), acknowledged: true },
                MentionEvent { agent: Some("forge".into()), acknowledged: false },
            ],
        };

        // Skipped events are not counted.
        assert_eq!(import_mentions(&mut monitor, &export), 1);
        assert_eq!(monitor.agent_count(), 1);
    }

    #[test]
    fn acknowledged_defaults_to_false() {
        let mut monitor = CoherenceMonitor::new();
        let count =
            import_mentions_json(&mut monitor, r#"{"events": [{"agent": "forge"}]}"#).unwrap();

        assert_eq!(count, 1);
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.mentions_received, 1);
        assert_eq!(forge.mentions_acknowledged, 0);
    }

    #[test]
    fn empty_export_imports_nothing() {
        let mut monitor = CoherenceMonitor::new();
        assert_eq!(import_mentions_json(&mut monitor, "{}").unwrap(), 0);
        assert_eq!(monitor.agent_count(), 0);
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let mut monitor = CoherenceMonitor::new();
        let err = import_mentions_json(&mut monitor, "{not json").unwrap_err();
        assert!(matches!(err, AdapterError::Parse(_)));
    }
}
