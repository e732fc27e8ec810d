//! Point-in-time captures of team health and trend reports.

use core::fmt;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Immutable capture of team and per-agent scores at one instant.
///
/// Snapshots are append-only trend input; nothing mutates one after it
/// is taken.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoherenceSnapshot {
    pub timestamp: DateTime<Utc>,
    pub overall_score: f64,
    pub agent_scores: BTreeMap<String, f64>,
    /// Agents flagged active at capture time.
    pub active_agents: usize,
    pub total_agents: usize,
    /// Alerts inside their active window at capture time.
    pub alerts_active: usize,
}

/// Direction of short-term score movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum TrendDirection {
    Improving,
    Stable,
    Degrading,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TrendDirection::Improving => "IMPROVING",
            TrendDirection::Stable => "STABLE",
            TrendDirection::Degrading => "DEGRADING",
        };
        write!(f, "{}", name)
    }
}

/// Summary of score movement over a trailing window of snapshots.
///
/// `change` is the difference between the mean scores of the newer and
/// older halves of the window, rounded to one decimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendReport {
    pub trend: TrendDirection,
    pub change: f64,
    /// Snapshots that qualified for the window.
    pub samples: usize,
    pub min_score: f64,
    pub max_score: f64,
    pub avg_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_serde_round_trip() {
        let mut agent_scores = BTreeMap::new();
        agent_scores.insert("FORGE".to_string(), 85.0);
        agent_scores.insert("SCOUT".to_string(), 92.5);

        let snapshot = CoherenceSnapshot {
            timestamp: Utc::now(),
            overall_score: 88.8,
            agent_scores,
            active_agents: 1,
            total_agents: 2,
            alerts_active: 3,
        };

        let json = serde_json::to_string(&snapshot).unwrap();
        let back: CoherenceSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(snapshot, back);
    }

    #[test]
    fn trend_direction_serializes_uppercase() {
        assert_eq!(
            serde_json::to_string(&TrendDirection::Improving).unwrap(),
            r#""IMPROVING""#
        );
        assert_eq!(
            serde_json::to_string(&TrendDirection::Degrading).unwrap(),
            r#""DEGRADING""#
        );
        assert_eq!(TrendDirection::Stable.to_string(), "STABLE");
    }

    #[test]
    fn trend_report_serde_round_trip() {
        let report = TrendReport {
            trend: TrendDirection::Degrading,
            change: -7.5,
            samples: 12,
            min_score: 61.2,
            max_score: 88.0,
            avg_score: 74.9,
        };
        let json = serde_json::to_string(&report).unwrap();
        let back: TrendReport = serde_json::from_str(&json).unwrap();
        assert_eq!(report, back);
    }
}
