//! Error types for import adapters.

use thiserror::Error;

/// Errors raised while applying an external tool's export.
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Export payload did not parse as the expected shape.
    #[error("Failed to parse export: {0}")]
    Parse(String),
}

impl From<serde_json::Error> for AdapterError {
    fn from(err: serde_json::Error) -> Self {
        AdapterError::Parse(err.to_string())
    }
}
