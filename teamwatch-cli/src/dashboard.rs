//! Plain-text dashboard rendering.
//!
//! Layout is fixed-width and ASCII only so output reads the same in a
//! terminal, a log file, or a chat paste.

use teamwatch_engine::{CoherenceMonitor, DEFAULT_TREND_WINDOW_MINUTES};

const RULE_WIDTH: usize = 70;

/// Most recent alerts shown in the full view.
const MAX_ALERT_ROWS: usize = 10;

/// Status icon for a 0-100 score.
pub fn score_icon(score: f64) -> &'static str {
    if score >= 75.0 {
        "[OK]"
    } else if score >= 50.0 {
        "[!]"
    } else {
        "[X]"
    }
}

/// Render the dashboard.
///
/// The compact form is one row per agent; the full form adds the agent
/// table, recent alerts, and the score trend.
pub fn render(monitor: &CoherenceMonitor, compact: bool) -> String {
    let mut lines: Vec<String> = Vec::new();

    let score = monitor.coherence_score();
    lines.push("=".repeat(RULE_WIDTH));
    lines.push(format!(
        "TEAM COHERENCE MONITOR - Score: {:.1}/100 {}",
        score,
        score_icon(score)
    ));
    lines.push("=".repeat(RULE_WIDTH));

    if compact {
        render_compact(monitor, &mut lines);
    } else {
        render_full(monitor, &mut lines);
    }

    lines.push("=".repeat(RULE_WIDTH));
    lines.join("\n")
}

fn render_compact(monitor: &CoherenceMonitor, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push(format!(
        "Agents: {} | Active Alerts: {}",
        monitor.agent_count(),
        monitor.alerts(None).len()
    ));
    lines.push(String::new());

    for (name, score) in monitor.agent_scores() {
        let Some(record) = monitor.agent(&name) else { continue };
        lines.push(format!(
            "  {:12} {:5.1} {}  ACK:{:5.1}%  LAT:{:5.1}s",
            name,
            score,
            score_icon(score),
            record.ack_rate(),
            record.avg_latency()
        ));
    }
}

fn render_full(monitor: &CoherenceMonitor, lines: &mut Vec<String>) {
    lines.push(String::new());
    lines.push("AGENT STATUS".to_string());
    lines.push("-".repeat(RULE_WIDTH));
    lines.push(format!(
        "{:<12} {:>6} {:>6} {:>8} {:>8} {:>8}",
        "Agent", "Score", "ACK%", "Latency", "Fidelity", "Status"
    ));
    lines.push("-".repeat(RULE_WIDTH));

    for (name, score) in monitor.agent_scores() {
        let Some(record) = monitor.agent(&name) else { continue };
        let status = if record.is_active { "Active" } else { "Inactive" };
        lines.push(format!(
            "{:<12} {:>6.1} {:>5.1}% {:>7.1}s {:>7.1}% {:>8}",
            name,
            score,
            record.ack_rate(),
            record.avg_latency(),
            record.context_fidelity(),
            status
        ));
    }

    lines.push(String::new());
    lines.push("ALERTS".to_string());
    lines.push("-".repeat(RULE_WIDTH));

    let alerts = monitor.alerts(None);
    if alerts.is_empty() {
        lines.push("No active alerts".to_string());
    } else {
        let start = alerts.len().saturating_sub(MAX_ALERT_ROWS);
        for alert in &alerts[start..] {
            lines.push(format!(
                "{} [{}] {}",
                alert.severity.symbol(),
                alert.agent.as_deref().unwrap_or("TEAM"),
                alert.message
            ));
        }
    }

    let trend = monitor.trend(DEFAULT_TREND_WINDOW_MINUTES);
    lines.push(String::new());
    lines.push(format!(
        "TREND ({}min): {} ({:+.1})",
        DEFAULT_TREND_WINDOW_MINUTES, trend.trend, trend.change
    ));
}
