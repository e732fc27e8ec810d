//! Per-agent accumulated state and derived coordination rates.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum retained response latency samples per agent.
pub const MAX_LATENCY_SAMPLES: usize = 100;

/// Accumulated counters and history for a single agent.
///
/// Records are keyed by canonical (uppercase) name. Counters only grow
/// during a session; derived rates fall out of the counters on demand.
/// Callers may report inconsistent counts (say, more acknowledgments
/// than mentions); the derived rates return the literal arithmetic
/// result without clamping.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentRecord {
    /// Canonical agent name.
    pub name: String,

    /// When the agent last showed recency-bearing activity.
    #[serde(default)]
    pub last_seen: Option<DateTime<Utc>>,

    /// Set whenever a recency-bearing event is recorded.
    #[serde(default)]
    pub is_active: bool,

    /// Most recent response latencies in seconds, oldest first.
    #[serde(default)]
    pub response_latencies: VecDeque<f64>,

    #[serde(default)]
    pub mentions_received: u64,
    #[serde(default)]
    pub mentions_acknowledged: u64,
    #[serde(default)]
    pub correct_claims: u64,
    #[serde(default)]
    pub total_claims: u64,
    #[serde(default)]
    pub messages_sent: u64,
    #[serde(default)]
    pub errors_detected: u64,
}

impl AgentRecord {
    /// Create an empty record for a canonical name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            last_seen: None,
            is_active: false,
            response_latencies: VecDeque::new(),
            mentions_received: 0,
            mentions_acknowledged: 0,
            correct_claims: 0,
            total_claims: 0,
            messages_sent: 0,
            errors_detected: 0,
        }
    }

    /// Percentage of received mentions that were acknowledged.
    ///
    /// With no mentions there is nothing to miss, which reads as a
    /// perfect rate rather than zero.
    pub fn ack_rate(&self) -> f64 {
        if self.mentions_received == 0 {
            return 100.0;
        }
        self.mentions_acknowledged as f64 / self.mentions_received as f64 * 100.0
    }

    /// Mean of the retained response latencies, 0.0 with no samples.
    pub fn avg_latency(&self) -> f64 {
        if self.response_latencies.is_empty() {
            return 0.0;
        }
        self.response_latencies.iter().sum::<f64>() / self.response_latencies.len() as f64
    }

    /// Percentage of this agent's claims that were correct, 100.0 with
    /// no claims.
    pub fn context_fidelity(&self) -> f64 {
        if self.total_claims == 0 {
            return 100.0;
        }
        self.correct_claims as f64 / self.total_claims as f64 * 100.0
    }

    /// Append a latency sample, evicting the oldest past the cap.
    pub fn record_latency(&mut self, seconds: f64) {
        self.response_latencies.push_back(seconds);
        self.truncate_latencies();
    }

    /// Mark recency-bearing activity at the given instant.
    pub fn touch(&mut self, now: DateTime<Utc>) {
        self.last_seen = Some(now);
        self.is_active = true;
    }

    /// Add a batch of graded claims to the counters.
    pub fn add_claims(&mut self, total: u64, correct: u64) {
        self.total_claims += total;
        self.correct_claims += correct;
    }

    /// Drop latency samples beyond the retention cap, oldest first.
    ///
    /// Persisted files are untrusted; a hand-edited history longer than
    /// the cap is cut back here on restore.
    pub fn truncate_latencies(&mut self) {
        while self.response_latencies.len() > MAX_LATENCY_SAMPLES {
            self.response_latencies.pop_front();
        }
    }
}

/// Point-in-time detail view of one agent.
///
/// Rates are rounded for display: ack rate and fidelity to one decimal,
/// average latency to two. The raw counters are carried unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentMetrics {
    pub name: String,
    pub ack_rate: f64,
    pub avg_latency: f64,
    pub context_fidelity: f64,
    pub mentions_received: u64,
    pub mentions_acknowledged: u64,
    pub correct_claims: u64,
    pub total_claims: u64,
    pub messages_sent: u64,
    pub errors_detected: u64,
    pub is_active: bool,
    pub last_seen: Option<DateTime<Utc>>,
    pub coherence_score: f64,
}
