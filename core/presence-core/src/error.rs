//! Error types for presence-core operations.
//!
//! Synthesis itself never fails; these errors only come from the file-backed
//! edges (configuration and the start-timestamp store).

use std::path::PathBuf;

/// All errors that can occur in presence-core operations.
#[derive(Debug, thiserror::Error)]
pub enum PresenceError {
    // ─────────────────────────────────────────────────────────────────────
    // Configuration Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("Configuration file malformed: {path}: {details}")]
    ConfigMalformed { path: PathBuf, details: String },

    #[error("Configuration serialization failed: {0}")]
    ConfigSerialize(String),

    // ─────────────────────────────────────────────────────────────────────
    // I/O Errors
    // ─────────────────────────────────────────────────────────────────────
    #[error("I/O error: {context}: {source}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON parsing error: {context}: {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Convenience type alias for Results using PresenceError.
pub type Result<T> = std::result::Result<T, PresenceError>;

impl From<PresenceError> for String {
    fn from(err: PresenceError) -> String {
        err.to_string()
    }
}
