//! Interchange shapes for persistence and export.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::agent::AgentRecord;
use crate::alert::Alert;
use crate::snapshot::TrendReport;
use crate::thresholds::Thresholds;

/// On-disk monitor state.
///
/// `saved_at` is informational and ignored on load. `thresholds` is
/// optional so a file written without one keeps whatever thresholds the
/// loading monitor already has. Missing sections fall back to defaults,
/// letting older or hand-trimmed files still load.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedState {
    pub saved_at: Option<DateTime<Utc>>,
    pub agents: BTreeMap<String, AgentRecord>,
    pub thresholds: Option<Thresholds>,
}

/// The aggregate export payload.
///
/// Consumers (persistence, CLI, downstream tools) serialize this to
/// JSON verbatim; it is the canonical interchange shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonitorExport {
    pub timestamp: DateTime<Utc>,
    pub coherence_score: f64,
    pub agent_scores: BTreeMap<String, f64>,
    pub agents: BTreeMap<String, AgentRecord>,
    pub active_alerts: Vec<Alert>,
    pub trend: TrendReport,
    pub thresholds: Thresholds,
}
