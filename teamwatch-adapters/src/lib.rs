//! # teamwatch-adapters
//!
//! Importers that map external coordination tool exports into
//! teamwatch recording calls.
//!
//! Each adapter understands one foreign export shape and replays it
//! against a [`CoherenceMonitor`], returning how many events it
//! consumed. Entries that do not name an agent are skipped rather than
//! rejected.
//!
//! ## Supported Sources
//!
//! - **Mention trackers** ([`mentions`]) - `{agent, acknowledged}`
//!   events, one `record_mention` each
//! - **Audit tools** ([`audit`]) - flagged issues, each an incorrect
//!   claim plus a detected error
//! - **Retrospective grading** ([`grading`]) - per-agent session
//!   grades converted back into claim counters
//!
//! ## Quick Start
//!
//! ```rust
//! use teamwatch_adapters::{import_mentions_json, CoherenceMonitor};
//!
//! let mut monitor = CoherenceMonitor::new();
//! let json = r#"{"events": [
//!     {"agent": "forge", "acknowledged": true},
//!     {"agent": "atlas"}
//! ]}"#;
//!
//! let count = import_mentions_json(&mut monitor, json).unwrap();
//! assert_eq!(count, 2);
//! ```

pub mod audit;
pub mod error;
pub mod grading;
pub mod mentions;

pub use audit::{import_audit, import_audit_json, AuditExport, AuditIssue};
pub use error::AdapterError;
pub use grading::{import_grades, import_grades_json, AgentGrade, GradingExport};
pub use mentions::{import_mentions, import_mentions_json, MentionEvent, MentionExport};

// Re-export the monitor for convenience
pub use teamwatch_engine::CoherenceMonitor;
