//! Alert generation, precedence, and lifecycle.

use std::collections::VecDeque;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use teamwatch_types::{AgentRecord, Alert, Metric, Severity, Thresholds};
use tracing::debug;

/// Maximum alerts retained in history, oldest evicted first.
pub const MAX_ALERT_HISTORY: usize = 1000;

/// Seconds an alert stays in the active set before aging out.
const ACTIVE_WINDOW_SECS: i64 = 3600;

/// Which side of a cutoff counts as crossed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Crossing {
    /// Lower is worse: crossed when the value drops below the cutoff.
    Below,
    /// Higher is worse: crossed when the value reaches the cutoff.
    AtOrAbove,
}

/// One metric's cutoff pair. Critical is always evaluated before
/// warning, so a single evaluation emits at most one severity.
#[derive(Debug, Clone, Copy)]
struct ThresholdRule {
    metric: Metric,
    crossing: Crossing,
    warning: f64,
    critical: f64,
}

impl ThresholdRule {
    fn crossed(&self, value: f64, cutoff: f64) -> bool {
        match self.crossing {
            Crossing::Below => value < cutoff,
            Crossing::AtOrAbove => value >= cutoff,
        }
    }

    /// Severity and crossed cutoff for a value, or `None` when the
    /// value is inside both cutoffs.
    fn evaluate(&self, value: f64) -> Option<(Severity, f64)> {
        if self.crossed(value, self.critical) {
            Some((Severity::Critical, self.critical))
        } else if self.crossed(value, self.warning) {
            Some((Severity::Warning, self.warning))
        } else {
            None
        }
    }
}

/// Stateful alert tracker.
///
/// Holds the active set, bounded by a sliding one-hour window, and a
/// FIFO history capped at [`MAX_ALERT_HISTORY`] entries regardless of
/// age. Alerts are immutable once created: they age out of the active
/// set and eventually fall off the history, never changing in between.
#[derive(Debug)]
pub struct AlertEngine {
    thresholds: Arc<Thresholds>,
    active: Vec<Alert>,
    history: VecDeque<Alert>,
}

impl AlertEngine {
    /// Create an engine over a shared threshold configuration.
    pub fn new(thresholds: Arc<Thresholds>) -> Self {
        Self {
            thresholds,
            active: Vec::new(),
            history: VecDeque::new(),
        }
    }

    /// The per-agent rule table, in evaluation order.
    fn agent_rules(&self) -> [ThresholdRule; 4] {
        let t = &self.thresholds;
        [
            ThresholdRule {
                metric: Metric::AckRate,
                crossing: Crossing::Below,
                warning: t.ack_rate_warning,
                critical: t.ack_rate_critical,
            },
            ThresholdRule {
                metric: Metric::Latency,
                crossing: Crossing::AtOrAbove,
                warning: t.latency_warning,
                critical: t.latency_critical,
            },
            ThresholdRule {
                metric: Metric::Fidelity,
                crossing: Crossing::Below,
                warning: t.fidelity_warning,
                critical: t.fidelity_critical,
            },
            ThresholdRule {
                metric: Metric::Activity,
                crossing: Crossing::AtOrAbove,
                warning: t.inactive_warning,
                critical: t.inactive_critical,
            },
        ]
    }

    /// Evaluate one agent, producing at most one alert per metric.
    ///
    /// A metric is only evaluated when its signal is present: ack rate
    /// needs received mentions, latency needs a positive average,
    /// fidelity needs claims, and inactivity needs a last-seen instant.
    /// Never-seen agents therefore score poorly without alerting.
    pub fn check_agent(&self, record: &AgentRecord, now: DateTime<Utc>) -> Vec<Alert> {
        let mut alerts = Vec::new();

        for rule in self.agent_rules() {
            let value = match signal_value(rule.metric, record, now) {
                Some(value) => value,
                None => continue,
            };
            if let Some((severity, threshold)) = rule.evaluate(value) {
                alerts.push(Alert {
                    timestamp: now,
                    severity,
                    agent: Some(record.name.clone()),
                    metric: rule.metric,
                    message: agent_message(rule.metric, severity, &record.name, value),
                    value,
                    threshold,
                });
            }
        }

        alerts
    }

    /// Evaluate the aggregate score. Team alerts carry no agent name.
    pub fn check_team_coherence(&self, score: f64, now: DateTime<Utc>) -> Option<Alert> {
        let rule = ThresholdRule {
            metric: Metric::Coherence,
            crossing: Crossing::Below,
            warning: self.thresholds.coherence_warning,
            critical: self.thresholds.coherence_critical,
        };

        rule.evaluate(score).map(|(severity, threshold)| Alert {
            timestamp: now,
            severity,
            agent: None,
            metric: Metric::Coherence,
            message: team_message(severity, score),
            value: score,
            threshold,
        })
    }

    /// Record new alerts and prune both retention structures.
    pub fn process(&mut self, new_alerts: Vec<Alert>, now: DateTime<Utc>) {
        if !new_alerts.is_empty() {
            debug!(count = new_alerts.len(), "recording new alerts");
        }
        for alert in new_alerts {
            self.active.push(alert.clone());
            self.history.push_back(alert);
        }

        let cutoff = now - Duration::seconds(ACTIVE_WINDOW_SECS);
        self.active.retain(|alert| alert.timestamp > cutoff);

        while self.history.len() > MAX_ALERT_HISTORY {
            self.history.pop_front();
        }
    }

    /// Copy of the active set, optionally filtered by exact severity.
    pub fn active_alerts(&self, severity: Option<Severity>) -> Vec<Alert> {
        self.active
            .iter()
            .filter(|alert| severity.map_or(true, |s| alert.severity == s))
            .cloned()
            .collect()
    }

    /// Number of currently active alerts.
    pub fn active_len(&self) -> usize {
        self.active.len()
    }

    /// Number of alerts retained in history.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Remove active alerts matching every supplied filter.
    ///
    /// An absent filter is a wildcard. The agent filter compares the
    /// alert's agent exactly, so team-level alerts never match one.
    /// Returns how many alerts were removed.
    pub fn clear(&mut self, agent: Option<&str>, metric: Option<Metric>) -> usize {
        let before = self.active.len();
        self.active.retain(|alert| {
            let agent_match = agent.map_or(true, |name| alert.agent.as_deref() == Some(name));
            let metric_match = metric.map_or(true, |m| alert.metric == m);
            !(agent_match && metric_match)
        });
        before - self.active.len()
    }
}

/// The observed value for an agent metric, `None` when the signal is
/// absent. Coherence is team-level and never an agent signal.
fn signal_value(metric: Metric, record: &AgentRecord, now: DateTime<Utc>) -> Option<f64> {
    match metric {
        Metric::AckRate => (record.mentions_received > 0).then(|| record.ack_rate()),
        Metric::Latency => {
            let avg = record.avg_latency();
            (avg > 0.0).then_some(avg)
        }
        Metric::Fidelity => (record.total_claims > 0).then(|| record.context_fidelity()),
        Metric::Activity => record
            .last_seen
            .map(|seen| (now - seen).num_milliseconds() as f64 / 1000.0),
        Metric::Coherence => None,
    }
}

fn agent_message(metric: Metric, severity: Severity, name: &str, value: f64) -> String {
    match (metric, severity) {
        (Metric::AckRate, Severity::Critical) => {
            format!("{} acknowledgment rate critically low", name)
        }
        (Metric::AckRate, _) => format!("{} acknowledgment rate below threshold", name),
        (Metric::Latency, Severity::Critical) => {
            format!("{} response latency critically high", name)
        }
        (Metric::Latency, _) => format!("{} response latency high", name),
        (Metric::Fidelity, Severity::Critical) => {
            format!("{} context fidelity critically low", name)
        }
        (Metric::Fidelity, _) => format!("{} context fidelity below threshold", name),
        (Metric::Activity, Severity::Critical) => {
            format!("{} has been inactive for {:.0}s", name, value)
        }
        (Metric::Activity, _) => format!("{} inactive for {:.0}s", name, value),
        (Metric::Coherence, _) => team_message(severity, value),
    }
}

fn team_message(severity: Severity, score: f64) -> String {
    match severity {
        Severity::Critical => format!("Team coherence critically low: {:.1}", score),
        _ => format!("Team coherence below threshold: {:.1}", score),
    }
}
