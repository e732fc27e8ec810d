//! Alert records and their severity and metric tags.

use core::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Alert severity, ordered from least to most severe.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Critical,
}

impl Severity {
    /// Returns a short icon for text output.
    pub fn symbol(&self) -> &'static str {
        match self {
            Severity::Info => "[i]",
            Severity::Warning => "[!]",
            Severity::Critical => "[X]",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Severity::Info => "INFO",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Severity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Severity::Info),
            "WARNING" => Ok(Severity::Warning),
            "CRITICAL" => Ok(Severity::Critical),
            other => Err(format!("unknown severity: {}", other)),
        }
    }
}

/// The signal an alert refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    AckRate,
    Latency,
    Fidelity,
    Activity,
    Coherence,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Metric::AckRate => "ack_rate",
            Metric::Latency => "latency",
            Metric::Fidelity => "fidelity",
            Metric::Activity => "activity",
            Metric::Coherence => "coherence",
        };
        write!(f, "{}", name)
    }
}

/// A single threshold crossing, immutable once created.
///
/// `agent` is `None` for team-level alerts. `value` is the observed
/// signal and `threshold` the cutoff it crossed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Alert {
    pub timestamp: DateTime<Utc>,
    pub severity: Severity,
    pub agent: Option<String>,
    pub metric: Metric,
    pub message: String,
    pub value: f64,
    pub threshold: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_ordering() {
        assert!(Severity::Info < Severity::Warning);
        assert!(Severity::Warning < Severity::Critical);
    }

    #[test]
    fn severity_symbols() {
        assert_eq!(Severity::Info.symbol(), "[i]");
        assert_eq!(Severity::Warning.symbol(), "[!]");
        assert_eq!(Severity::Critical.symbol(), "[X]");
    }

    #[test]
    fn severity_display_round_trips_through_from_str() {
        for severity in [Severity::Info, Severity::Warning, Severity::Critical] {
            let parsed: Severity = severity.to_string().parse().unwrap();
            assert_eq!(parsed, severity);
        }
    }

    #[test]
    fn severity_parses_case_insensitively() {
        assert_eq!("critical".parse::<Severity>().unwrap(), Severity::Critical);
        assert_eq!("Warning".parse::<Severity>().unwrap(), Severity::Warning);
    }

    #[test]
    fn severity_rejects_unknown_names() {
        assert!("FATAL".parse::<Severity>().is_err());
    }

    #[test]
    fn severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Critical).unwrap();
        assert_eq!(json, r#""CRITICAL""#);
    }

    #[test]
    fn metric_serializes_snake_case() {
        let json = serde_json::to_string(&Metric::AckRate).unwrap();
        assert_eq!(json, r#""ack_rate""#);
        assert_eq!(Metric::AckRate.to_string(), "ack_rate");
    }

    #[test]
    fn alert_serde_round_trip() {
        let alert = Alert {
            timestamp: Utc::now(),
            severity: Severity::Warning,
            agent: Some("FORGE".to_string()),
            metric: Metric::Latency,
            message: "FORGE response latency high".to_string(),
            value: 42.5,
            threshold: 30.0,
        };
        let json = serde_json::to_string(&alert).unwrap();
        let back: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(alert, back);
    }

    #[test]
    fn team_alert_serializes_null_agent() {
        let alert = Alert {
            timestamp: Utc::now(),
            severity: Severity::Critical,
            agent: None,
            metric: Metric::Coherence,
            message: "Team coherence critically low: 42.0".to_string(),
            value: 42.0,
            threshold: 50.0,
        };
        let json = serde_json::to_string(&alert).unwrap();
        assert!(json.contains(r#""agent":null"#));
        let back: Alert = serde_json::from_str(&json).unwrap();
        assert_eq!(back.agent, None);
    }
}
