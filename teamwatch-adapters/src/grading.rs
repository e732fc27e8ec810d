//! Importer for retrospective grading exports.
//!
//! Grading tools score each agent's output for a whole session as a
//! percentage. The grade is converted back into claim counters: the
//! covered claims are added to the total, and `floor(claims x
//! grade/100)` of them count as correct.

use serde::Deserialize;
use teamwatch_engine::CoherenceMonitor;

use crate::AdapterError;

fn default_grade() -> f64 {
    100.0
}

fn default_claims_made() -> u64 {
    10
}

/// One agent's grade from a retrospective export.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentGrade {
    /// Graded agent. Entries without one are skipped.
    #[serde(default)]
    pub agent: Option<String>,

    /// Grade percentage, nominally 0-100 but not validated.
    #[serde(default = "default_grade")]
    pub grade: f64,

    /// How many claims the grade covers.
    #[serde(default = "default_claims_made")]
    pub claims_made: u64,
}

/// Top-level grading export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GradingExport {
    #[serde(default)]
    pub agent_grades: Vec<AgentGrade>,
}

/// Apply a grading export, returning the number of entries consumed.
///
/// The correct-claim count is `claims_made x grade / 100` truncated
/// toward zero; a negative grade saturates to zero correct claims. A
/// grade above 100 yields more correct claims than total, surfacing
/// later as an out-of-range fidelity rather than an error.
pub fn import_grades(monitor: &mut CoherenceMonitor, export: &GradingExport) -> usize {
    let mut count = 0;
    for entry in &export.agent_grades {
        let agent = match entry.agent.as_deref() {
            Some(agent) if !agent.is_empty() => agent,
            _ => continue,
        };
        let correct = (entry.claims_made as f64 * entry.grade / 100.0) as u64;
        monitor
            .register_agent(agent)
            .add_claims(entry.claims_made, correct);
        count += 1;
    }
    count
}

/// Parse a raw JSON export and apply it.
pub fn import_grades_json(
    monitor: &mut CoherenceMonitor,
    json: &str,
) -> Result<usize, AdapterError> {
    let export: GradingExport = serde_json::from_str(json)?;
    Ok(import_grades(monitor, &export))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grades_convert_to_claim_counters() {
        let mut monitor = CoherenceMonitor::new();
        let json = r#"{"agent_grades": [{"agent": "forge", "grade": 80, "claims_made": 10}]}"#;

        assert_eq!(import_grades_json(&mut monitor, json).unwrap(), 1);
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.total_claims, 10);
        assert_eq!(forge.correct_claims, 8);
        assert_eq!(forge.context_fidelity(), 80.0);
    }

    #[test]
    fn fractional_correct_count_is_floored() {
        let mut monitor = CoherenceMonitor::new();
        let export = GradingExport {
            agent_grades: vec![AgentGrade {
                agent: Some("forge".into()),
                grade: 85.0,
                claims_made: 10,
            }],
        };

        import_grades(&mut monitor, &export);
        // 8.5 correct claims floors to 8.
        assert_eq!(monitor.agent("FORGE").unwrap().correct_claims, 8);
    }

    #[test]
    fn missing_fields_use_defaults() {
        let mut monitor = CoherenceMonitor::new();
        let json = r#"{"agent_grades": [{"agent": "forge"}]}"#;

        import_grades_json(&mut monitor, json).unwrap();
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.total_claims, 10);
        assert_eq!(forge.correct_claims, 10);
    }

    #[test]
    fn negative_grade_contributes_no_correct_claims() {
        let mut monitor = CoherenceMonitor::new();
        let export = GradingExport {
            agent_grades: vec![AgentGrade {
                agent: Some("forge".into()),
                grade: -50.0,
                claims_made: 10,
            }],
        };

        import_grades(&mut monitor, &export);
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.total_claims, 10);
        assert_eq!(forge.correct_claims, 0);
    }

    #[test]
    fn grade_above_100_is_not_clamped() {
        let mut monitor = CoherenceMonitor::new();
        let export = GradingExport {
            agent_grades: vec![AgentGrade {
                agent: Some("forge".into()),
                grade: 150.0,
                claims_made: 10,
            }],
        };

        import_grades(&mut monitor, &export);
        let forge = monitor.agent("FORGE").unwrap();
        assert_eq!(forge.correct_claims, 15);
        assert_eq!(forge.context_fidelity(), 150.0);
    }

    #[test]
    fn entries_without_an_agent_are_skipped() {
        let mut monitor = CoherenceMonitor::new();
        let export = GradingExport {
            agent_grades: vec![
                AgentGrade { agent: None, grade: 90.0, claims_made: 5 },
                AgentGrade { agent: Some("forge".into()), grade: 90.0, claims_made: 10 },
            ],
        };

        assert_eq!(import_grades(&mut monitor, &export), 1);
        assert_eq!(monitor.agent_count(), 1);
    }
}
