//! Monitor facade owning the agent table, snapshots, and alert state.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use teamwatch_types::{
    AgentMetrics, AgentRecord, Alert, CoherenceSnapshot, Metric, MonitorExport, PersistedState,
    Severity, Thresholds, TrendReport,
};
use tracing::{debug, warn};

use crate::alert::AlertEngine;
use crate::scorer::{round1, round2, CoherenceScorer};
use crate::trend::analyze_trend;

/// Maximum snapshots retained for trend analysis, oldest evicted first.
pub const MAX_SNAPSHOTS: usize = 1000;

fn canonical(name: &str) -> String {
    name.to_uppercase()
}

/// Owns all monitoring state and orchestrates scoring, alerting, and
/// trend analysis over it.
///
/// The facade is single-threaded by design: no operation blocks, and
/// callers embedding it in a concurrent host serialize access
/// themselves. Agent names are canonicalized to uppercase on every
/// entry point, so `forge` and `FORGE` always reach the same record,
/// and any recording call registers its agent implicitly.
#[derive(Debug)]
pub struct CoherenceMonitor {
    thresholds: Arc<Thresholds>,
    agents: BTreeMap<String, AgentRecord>,
    snapshots: VecDeque<CoherenceSnapshot>,
    scorer: CoherenceScorer,
    alerts: AlertEngine,
}

impl CoherenceMonitor {
    /// Create a monitor with default thresholds.
    pub fn new() -> Self {
        Self::with_thresholds(Thresholds::default())
    }

    /// Create a monitor with explicit thresholds.
    pub fn with_thresholds(thresholds: Thresholds) -> Self {
        let shared = Arc::new(thresholds);
        Self {
            scorer: CoherenceScorer::new(Arc::clone(&shared)),
            alerts: AlertEngine::new(Arc::clone(&shared)),
            thresholds: shared,
            agents: BTreeMap::new(),
            snapshots: VecDeque::new(),
        }
    }

    /// The active threshold configuration.
    pub fn thresholds(&self) -> &Thresholds {
        &self.thresholds
    }

    // ------------------------------------------------------------------
    // Registration
    // ------------------------------------------------------------------

    /// Get or create the record for an agent.
    pub fn register_agent(&mut self, name: &str) -> &mut AgentRecord {
        match self.agents.entry(canonical(name)) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                debug!(agent = %entry.key(), "registering agent");
                let record = AgentRecord::new(entry.key().clone());
                entry.insert(record)
            }
        }
    }

    /// Remove an agent. Returns whether it was registered.
    pub fn unregister_agent(&mut self, name: &str) -> bool {
        self.agents.remove(&canonical(name)).is_some()
    }

    /// Look up an agent's record.
    pub fn agent(&self, name: &str) -> Option<&AgentRecord> {
        self.agents.get(&canonical(name))
    }

    /// Registered agent names, in sorted order.
    pub fn agent_names(&self) -> Vec<String> {
        self.agents.keys().cloned().collect()
    }

    /// Number of registered agents.
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    // ------------------------------------------------------------------
    // Recording
    // ------------------------------------------------------------------

    /// Record a bare activity ping.
    pub fn record_activity(&mut self, name: &str) {
        let now = Utc::now();
        self.register_agent(name).touch(now);
    }

    /// Record a mention of an agent, optionally already acknowledged.
    pub fn record_mention(&mut self, name: &str, acknowledged: bool) {
        let record = self.register_agent(name);
        record.mentions_received += 1;
        if acknowledged {
            record.mentions_acknowledged += 1;
        }
    }

    /// Record an acknowledgment of an earlier mention.
    pub fn record_acknowledgment(&mut self, name: &str) {
        self.register_agent(name).mentions_acknowledged += 1;
    }

    /// Record a response and its latency in seconds.
    pub fn record_response(&mut self, name: &str, latency_secs: f64) {
        let now = Utc::now();
        let record = self.register_agent(name);
        record.record_latency(latency_secs);
        record.messages_sent += 1;
        record.touch(now);
    }

    /// Record a claim and whether it was correct.
    pub fn record_claim(&mut self, name: &str, correct: bool) {
        let record = self.register_agent(name);
        record.total_claims += 1;
        if correct {
            record.correct_claims += 1;
        }
    }

    /// Record a detected error.
    pub fn record_error(&mut self, name: &str) {
        self.register_agent(name).errors_detected += 1;
    }

    // ------------------------------------------------------------------
    // Scoring and analysis
    // ------------------------------------------------------------------

    /// Current team coherence score.
    pub fn coherence_score(&self) -> f64 {
        let (score, _) = self.scorer.team_score(&self.agents, Utc::now());
        score
    }

    /// Current per-agent coherence scores.
    pub fn agent_scores(&self) -> BTreeMap<String, f64> {
        let (_, scores) = self.scorer.team_score(&self.agents, Utc::now());
        scores
    }

    /// Detail metrics for one agent, `None` when unregistered.
    pub fn agent_metrics(&self, name: &str) -> Option<AgentMetrics> {
        let record = self.agent(name)?;
        Some(AgentMetrics {
            name: record.name.clone(),
            ack_rate: round1(record.ack_rate()),
            avg_latency: round2(record.avg_latency()),
            context_fidelity: round1(record.context_fidelity()),
            mentions_received: record.mentions_received,
            mentions_acknowledged: record.mentions_acknowledged,
            correct_claims: record.correct_claims,
            total_claims: record.total_claims,
            messages_sent: record.messages_sent,
            errors_detected: record.errors_detected,
            is_active: record.is_active,
            last_seen: record.last_seen,
            coherence_score: self.scorer.agent_score(record, Utc::now()),
        })
    }

    /// Capture the current state into the snapshot history.
    pub fn take_snapshot(&mut self) -> CoherenceSnapshot {
        let now = Utc::now();
        let (score, agent_scores) = self.scorer.team_score(&self.agents, now);
        let active_agents = self.agents.values().filter(|a| a.is_active).count();

        let snapshot = CoherenceSnapshot {
            timestamp: now,
            overall_score: score,
            agent_scores,
            active_agents,
            total_agents: self.agents.len(),
            alerts_active: self.alerts.active_len(),
        };

        self.snapshots.push_back(snapshot.clone());
        while self.snapshots.len() > MAX_SNAPSHOTS {
            self.snapshots.pop_front();
        }

        snapshot
    }

    /// Score movement over the trailing window.
    pub fn trend(&self, window_minutes: u32) -> TrendReport {
        let now = Utc::now();
        let (current, _) = self.scorer.team_score(&self.agents, now);
        analyze_trend(&self.snapshots, window_minutes, now, current)
    }

    // ------------------------------------------------------------------
    // Alerts
    // ------------------------------------------------------------------

    /// Evaluate every agent plus the team score, recording and
    /// returning the newly generated alerts.
    pub fn check_all_alerts(&mut self) -> Vec<Alert> {
        let now = Utc::now();
        let mut new_alerts = Vec::new();

        for record in self.agents.values() {
            new_alerts.extend(self.alerts.check_agent(record, now));
        }

        let (score, _) = self.scorer.team_score(&self.agents, now);
        if let Some(alert) = self.alerts.check_team_coherence(score, now) {
            new_alerts.push(alert);
        }

        if !new_alerts.is_empty() {
            warn!(count = new_alerts.len(), "coherence check raised new alerts");
        }
        self.alerts.process(new_alerts.clone(), now);

        new_alerts
    }

    /// Active alerts, optionally filtered by severity.
    pub fn alerts(&self, severity: Option<Severity>) -> Vec<Alert> {
        self.alerts.active_alerts(severity)
    }

    /// Clear active alerts, optionally only those for one agent.
    ///
    /// The name is matched exactly against the alert's agent field, so
    /// team-level alerts are never cleared by an agent filter.
    pub fn clear_alerts(&mut self, agent: Option<&str>) -> usize {
        self.alerts.clear(agent, None)
    }

    /// Clear active alerts for one metric, optionally scoped to an
    /// agent.
    pub fn clear_metric_alerts(&mut self, agent: Option<&str>, metric: Metric) -> usize {
        self.alerts.clear(agent, Some(metric))
    }

    // ------------------------------------------------------------------
    // Interchange
    // ------------------------------------------------------------------

    /// The full interchange payload consumed by persistence and the
    /// CLI.
    pub fn export(&self) -> MonitorExport {
        let now = Utc::now();
        let (score, agent_scores) = self.scorer.team_score(&self.agents, now);
        MonitorExport {
            timestamp: now,
            coherence_score: score,
            agent_scores,
            agents: self.agents.clone(),
            active_alerts: self.alerts.active_alerts(None),
            trend: analyze_trend(
                &self.snapshots,
                crate::trend::DEFAULT_TREND_WINDOW_MINUTES,
                now,
                score,
            ),
            thresholds: (*self.thresholds).clone(),
        }
    }

    /// The durable subset of monitor state.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            saved_at: Some(Utc::now()),
            agents: self.agents.clone(),
            thresholds: Some((*self.thresholds).clone()),
        }
    }

    /// Replace monitor state from a persisted snapshot.
    ///
    /// Latency histories are truncated back to the retention cap in
    /// case the file was edited by hand. Thresholds are only replaced
    /// when the state carries them; alert and snapshot history are not
    /// persisted and start empty either way.
    pub fn restore(&mut self, state: PersistedState) {
        self.agents = state.agents;
        for record in self.agents.values_mut() {
            record.truncate_latencies();
        }
        if let Some(thresholds) = state.thresholds {
            self.apply_thresholds(thresholds);
        }
        debug!(agents = self.agents.len(), "restored persisted state");
    }

    /// Discard all agents, snapshots, and alert state. Thresholds are
    /// kept.
    pub fn reset(&mut self) {
        self.agents.clear();
        self.snapshots.clear();
        self.alerts = AlertEngine::new(Arc::clone(&self.thresholds));
        debug!("monitoring state reset");
    }

    fn apply_thresholds(&mut self, thresholds: Thresholds) {
        let shared = Arc::new(thresholds);
        self.scorer = CoherenceScorer::new(Arc::clone(&shared));
        self.alerts = AlertEngine::new(Arc::clone(&shared));
        self.thresholds = shared;
    }
}

impl Default for CoherenceMonitor {
    fn default() -> Self {
        Self::new()
    }
}
