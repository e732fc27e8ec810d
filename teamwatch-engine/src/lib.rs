//! # teamwatch-engine
//!
//! Scoring, alerting, and trend analysis for agent coordination
//! telemetry.
//!
//! The engine turns recorded coordination events (mentions, responses,
//! claims, activity pings) into a 0-100 coherence score per agent and
//! for the team, raises threshold alerts when signals degrade, and
//! classifies score movement over time.
//!
//! ## Quick Start
//!
//! ```rust
//! use teamwatch_engine::CoherenceMonitor;
//!
//! let mut monitor = CoherenceMonitor::new();
//!
//! // Record coordination events as they happen
//! monitor.record_mention("forge", true);
//! monitor.record_response("forge", 2.5);
//! monitor.record_claim("forge", true);
//!
//! // Score and check the team
//! let score = monitor.coherence_score();
//! assert!(score > 75.0);
//! let new_alerts = monitor.check_all_alerts();
//! assert!(new_alerts.is_empty());
//! ```
//!
//! ## Design
//!
//! - **Pure scoring**: the scorer is a function of a record and a
//!   timestamp, never of ambient state
//! - **Bounded memory**: 100 latency samples per agent, 1000 alerts,
//!   1000 snapshots, a one-hour active-alert window
//! - **No validation**: implausible inputs are recorded as-is and
//!   surface as out-of-range rates rather than errors
//! - **Single-threaded**: callers embedding the monitor in concurrent
//!   hosts serialize access themselves

mod alert;
mod monitor;
mod scorer;
mod trend;

pub use alert::{AlertEngine, MAX_ALERT_HISTORY};
pub use monitor::{CoherenceMonitor, MAX_SNAPSHOTS};
pub use scorer::{
    CoherenceScorer, WEIGHT_ACK_RATE, WEIGHT_ACTIVITY, WEIGHT_FIDELITY, WEIGHT_LATENCY,
};
pub use trend::{analyze_trend, DEFAULT_TREND_WINDOW_MINUTES};

// Re-export types for convenience
pub use teamwatch_types::{
    AgentMetrics, AgentRecord, Alert, CoherenceSnapshot, Metric, MonitorExport, PersistedState,
    Severity, Thresholds, TrendDirection, TrendReport,
};
