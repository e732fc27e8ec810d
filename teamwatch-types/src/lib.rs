//! # teamwatch-types
//!
//! Core types for multi-agent coordination health. This crate defines the
//! universal schema a team of cooperating agents reports into and that
//! teamwatch and other monitoring tools consume.
//!
//! ## Design Goals
//!
//! - **Plain data**: Records, alerts, snapshots, and thresholds are value
//!   types with small derived-rate methods and no engine logic
//! - **Stable interchange**: Everything serializes through serde with
//!   ISO-8601 timestamps, so persisted state round-trips losslessly
//! - **Defensive by convention**: Zero-denominator rates return the
//!   "no signal = perfect signal" value instead of dividing
//! - **Bounded history**: Latency samples are capped per agent with FIFO
//!   eviction
//!
//! ## Example
//!
//! ```rust
//! use teamwatch_types::AgentRecord;
//!
//! let mut record = AgentRecord::new("FORGE");
//! record.mentions_received = 10;
//! record.mentions_acknowledged = 8;
//! record.record_latency(2.5);
//!
//! assert_eq!(record.ack_rate(), 80.0);
//! assert_eq!(record.avg_latency(), 2.5);
//! assert_eq!(record.context_fidelity(), 100.0);
//! ```

mod agent;
mod alert;
mod snapshot;
mod state;
mod thresholds;

pub use agent::{AgentMetrics, AgentRecord, MAX_LATENCY_SAMPLES};
pub use alert::{Alert, Metric, Severity};
pub use snapshot::{CoherenceSnapshot, TrendDirection, TrendReport};
pub use state::{MonitorExport, PersistedState};
pub use thresholds::{Thresholds, ACTIVITY_RECENT_SECS, LATENCY_EXCELLENT_SECS};
