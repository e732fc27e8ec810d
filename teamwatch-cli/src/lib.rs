//! # teamwatch-cli
//!
//! Command-line front end for the teamwatch coherence monitor.
//!
//! The `teamwatch` binary wires the engine to on-disk state under
//! `~/.teamwatch` and renders plain-text reports. The two modules here
//! are its reusable pieces:
//!
//! - **[`store`]**: JSON persistence of monitor state in a data
//!   directory
//! - **[`dashboard`]**: fixed-width text rendering of scores, alerts,
//!   and trend

pub mod dashboard;
pub mod store;

// Re-export the monitor for convenience
pub use teamwatch_engine::CoherenceMonitor;
