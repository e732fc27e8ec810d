//! Importer for audit tool exports.
//!
//! Audit tools flag factually wrong statements after the fact. Each
//! flagged issue is charged to its agent as one incorrect claim plus
//! one detected error, pulling context fidelity down.

use serde::Deserialize;
use teamwatch_engine::CoherenceMonitor;

use crate::AdapterError;

/// One flagged issue from an audit export.
#[derive(Debug, Clone, Deserialize)]
pub struct AuditIssue {
    /// Agent the issue is attributed to. Issues without one are
    /// skipped.
    #[serde(default)]
    pub agent: Option<String>,
}

/// Top-level audit export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuditExport {
    #[serde(default)]
    pub issues: Vec<AuditIssue>,
}

/// Apply an audit export, returning the number of issues consumed.
pub fn import_audit(monitor: &mut CoherenceMonitor, export: &AuditExport) -> usize {
    let mut count = 0;
    for issue in &export.issues {
        let agent = match issue.agent.as_deref() {
            Some(agent) if !agent.is_empty() => agent,
            _ => continue,
        };
        monitor.record_claim(agent, false);
        monitor.record_error(agent);
        count += 1;
    }
    count
}

/// Parse a raw JSON export and apply it.
pub fn import_audit_json(
    monitor: &mut CoherenceMonitor,
    json: &str,
) -> Result<usize, AdapterError> {
    let export: AuditExport = serde_json::from_str(json)?;
    Ok(import_audit(monitor, &export))
}
