//! Trend analysis over recorded coherence snapshots.

use std::collections::VecDeque;

use chrono::{DateTime, Duration, Utc};
use teamwatch_types::{CoherenceSnapshot, TrendDirection, TrendReport};

use crate::scorer::round1;

/// Window used when the caller does not supply one, in minutes.
pub const DEFAULT_TREND_WINDOW_MINUTES: u32 = 30;

/// Absolute half-to-half change, in points, separating a trend from
/// noise.
const TREND_CHANGE_THRESHOLD: f64 = 5.0;

/// Classify score movement across the snapshots inside the window.
///
/// Snapshots are compared half against half: the mean of the earlier
/// half is subtracted from the mean of the later half, and the
/// direction is read off that change. Odd counts give the extra
/// snapshot to the later half. With fewer than two snapshots in the
/// window there is nothing to compare, so the report is stable at
/// `current_score` with a change of zero.
pub fn analyze_trend(
    snapshots: &VecDeque<CoherenceSnapshot>,
    window_minutes: u32,
    now: DateTime<Utc>,
    current_score: f64,
) -> TrendReport {
    let cutoff = now - Duration::minutes(i64::from(window_minutes));
    let scores: Vec<f64> = snapshots
        .iter()
        .filter(|snapshot| snapshot.timestamp > cutoff)
        .map(|snapshot| snapshot.overall_score)
        .collect();

    if scores.len() < 2 {
        return TrendReport {
            trend: TrendDirection::Stable,
            change: 0.0,
            samples: scores.len(),
            min_score: current_score,
            max_score: current_score,
            avg_score: current_score,
        };
    }

    let mid = scores.len() / 2;
    let change = mean(&scores[mid..]) - mean(&scores[..mid]);

    let trend = if change > TREND_CHANGE_THRESHOLD {
        TrendDirection::Improving
    } else if change < -TREND_CHANGE_THRESHOLD {
        TrendDirection::Degrading
    } else {
        TrendDirection::Stable
    };

    TrendReport {
        trend,
        change: round1(change),
        samples: scores.len(),
        min_score: scores.iter().copied().fold(f64::INFINITY, f64::min),
        max_score: scores.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        avg_score: round1(mean(&scores)),
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}
