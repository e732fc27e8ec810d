//! Threshold configuration for scoring and alerting.

use serde::{Deserialize, Serialize};

/// Average latency at or below this many seconds scores a perfect 100.
pub const LATENCY_EXCELLENT_SECS: f64 = 5.0;

/// Agents seen within this many seconds score a perfect 100 for activity.
pub const ACTIVITY_RECENT_SECS: f64 = 30.0;

/// Numeric cutoffs consumed by both the scorer and the alert engine.
///
/// Each monitored signal has a warning/critical pair, as does the
/// aggregate coherence score. Latency and inactivity cutoffs are in
/// seconds; ack rate, fidelity, and coherence cutoffs are percentages.
/// The struct is a pure value holder and is treated as immutable once
/// a monitor is built around it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Average response latency that triggers a warning.
    pub latency_warning: f64,
    /// Average response latency that triggers critical status.
    pub latency_critical: f64,
    /// Acknowledgment rate below this triggers a warning.
    pub ack_rate_warning: f64,
    /// Acknowledgment rate below this triggers critical status.
    pub ack_rate_critical: f64,
    /// Context fidelity below this triggers a warning.
    pub fidelity_warning: f64,
    /// Context fidelity below this triggers critical status.
    pub fidelity_critical: f64,
    /// Seconds without activity that trigger a warning.
    pub inactive_warning: f64,
    /// Seconds without activity that trigger critical status.
    pub inactive_critical: f64,
    /// Team coherence score below this triggers a warning.
    pub coherence_warning: f64,
    /// Team coherence score below this triggers critical status.
    pub coherence_critical: f64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            latency_warning: 30.0,
            latency_critical: 60.0,
            ack_rate_warning: 80.0,
            ack_rate_critical: 60.0,
            fidelity_warning: 90.0,
            fidelity_critical: 70.0,
            inactive_warning: 120.0,
            inactive_critical: 300.0,
            coherence_warning: 75.0,
            coherence_critical: 50.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_values() {
        let t = Thresholds::default();
        assert_eq!(t.latency_warning, 30.0);
        assert_eq!(t.latency_critical, 60.0);
        assert_eq!(t.ack_rate_warning, 80.0);
        assert_eq!(t.ack_rate_critical, 60.0);
        assert_eq!(t.fidelity_warning, 90.0);
        assert_eq!(t.fidelity_critical, 70.0);
        assert_eq!(t.inactive_warning, 120.0);
        assert_eq!(t.inactive_critical, 300.0);
        assert_eq!(t.coherence_warning, 75.0);
        assert_eq!(t.coherence_critical, 50.0);
    }

    #[test]
    fn serde_round_trip() {
        let t = Thresholds {
            latency_critical: 45.5,
            ..Default::default()
        };
        let json = serde_json::to_string(&t).unwrap();
        let back: Thresholds = serde_json::from_str(&json).unwrap();
        assert_eq!(t, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let t: Thresholds = serde_json::from_str(r#"{"latency_critical": 90.0}"#).unwrap();
        assert_eq!(t.latency_critical, 90.0);
        assert_eq!(t.latency_warning, 30.0);
        assert_eq!(t.coherence_critical, 50.0);
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let t: Thresholds =
            serde_json::from_str(r#"{"ack_rate_warning": 85.0, "not_a_cutoff": 1}"#).unwrap();
        assert_eq!(t.ack_rate_warning, 85.0);
    }
}
