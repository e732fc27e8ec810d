//! Coherence scoring: piecewise signal curves and weighted composition.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use teamwatch_types::{AgentRecord, Thresholds, ACTIVITY_RECENT_SECS, LATENCY_EXCELLENT_SECS};

/// Weight of the acknowledgment rate in the composite score.
pub const WEIGHT_ACK_RATE: f64 = 0.30;
/// Weight of the latency signal in the composite score.
pub const WEIGHT_LATENCY: f64 = 0.25;
/// Weight of context fidelity in the composite score.
pub const WEIGHT_FIDELITY: f64 = 0.30;
/// Weight of activity recency in the composite score.
pub const WEIGHT_ACTIVITY: f64 = 0.15;

/// Round to the one-decimal precision scores are reported at.
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to two decimals, the precision displayed latencies use.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Computes 0-100 coherence scores from agent records.
///
/// Pure: the caller passes the current instant, and nothing here mutates
/// a record. Signals with no data score a perfect 100 so that brand-new
/// agents do not trip alarms before they have any history.
#[derive(Debug, Clone)]
pub struct CoherenceScorer {
    thresholds: Arc<Thresholds>,
}

impl CoherenceScorer {
    /// Create a scorer over a shared threshold configuration.
    pub fn new(thresholds: Arc<Thresholds>) -> Self {
        Self { thresholds }
    }

    /// Score an average response latency.
    ///
    /// At or below [`LATENCY_EXCELLENT_SECS`] the score is perfect; at
    /// or above the critical threshold it is zero; in between it falls
    /// linearly.
    pub fn score_latency(&self, avg_latency: f64) -> f64 {
        if avg_latency <= 0.0 {
            return 100.0;
        }
        if avg_latency >= self.thresholds.latency_critical {
            return 0.0;
        }
        if avg_latency <= LATENCY_EXCELLENT_SECS {
            return 100.0;
        }

        let range = self.thresholds.latency_critical - LATENCY_EXCELLENT_SECS;
        let score = 100.0 - (avg_latency - LATENCY_EXCELLENT_SECS) / range * 100.0;
        score.clamp(0.0, 100.0)
    }

    /// Score the seconds elapsed since an agent was last seen.
    ///
    /// Same shape as the latency curve: perfect within
    /// [`ACTIVITY_RECENT_SECS`], zero at the critical inactivity
    /// threshold, linear in between.
    pub fn score_activity(&self, seconds_since_seen: f64) -> f64 {
        if seconds_since_seen <= 0.0 {
            return 100.0;
        }
        if seconds_since_seen >= self.thresholds.inactive_critical {
            return 0.0;
        }
        if seconds_since_seen <= ACTIVITY_RECENT_SECS {
            return 100.0;
        }

        let range = self.thresholds.inactive_critical - ACTIVITY_RECENT_SECS;
        let score = 100.0 - (seconds_since_seen - ACTIVITY_RECENT_SECS) / range * 100.0;
        score.clamp(0.0, 100.0)
    }

    /// Weighted composite score for one agent, rounded to one decimal.
    pub fn agent_score(&self, record: &AgentRecord, now: DateTime<Utc>) -> f64 {
        let ack_score = record.ack_rate();
        let latency_score = self.score_latency(record.avg_latency());
        let fidelity_score = record.context_fidelity();
        let activity_score = self.score_activity(self.seconds_since_seen(record, now));

        let total = ack_score * WEIGHT_ACK_RATE
            + latency_score * WEIGHT_LATENCY
            + fidelity_score * WEIGHT_FIDELITY
            + activity_score * WEIGHT_ACTIVITY;
        round1(total)
    }

    /// Team mean of per-agent scores plus the per-agent score map.
    ///
    /// An empty table scores a perfect 100 with an empty map.
    pub fn team_score(
        &self,
        records: &BTreeMap<String, AgentRecord>,
        now: DateTime<Utc>,
    ) -> (f64, BTreeMap<String, f64>) {
        if records.is_empty() {
            return (100.0, BTreeMap::new());
        }

        let agent_scores: BTreeMap<String, f64> = records
            .iter()
            .map(|(name, record)| (name.clone(), self.agent_score(record, now)))
            .collect();

        let overall = agent_scores.values().sum::<f64>() / agent_scores.len() as f64;
        (round1(overall), agent_scores)
    }

    /// Seconds since the record was last seen; never-seen agents count
    /// as inactive for the full critical span (worst case).
    fn seconds_since_seen(&self, record: &AgentRecord, now: DateTime<Utc>) -> f64 {
        match record.last_seen {
            Some(seen) => (now - seen).num_milliseconds() as f64 / 1000.0,
            None => self.thresholds.inactive_critical,
        }
    }
}
