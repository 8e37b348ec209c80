//! Unified error types for the Flowtrace workspace.
//!
//! The connection-tracking core itself has no fallible operations; errors
//! exist only at the probe boundary (procfs scanning, event replay, tracer
//! attachment) and are wrapped in these common variants.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum FlowtraceError {
    /// An I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A configuration value is invalid.
    #[error("invalid configuration: {message}")]
    Config {
        /// Description of the invalid configuration.
        message: String,
    },

    /// Serialization or deserialization failed.
    #[error("serialization error: {source}")]
    Serialization {
        /// Underlying serialization error.
        #[from]
        source: serde_json::Error,
    },

    /// The kernel event tracer cannot be attached on this host.
    #[error("tcp tracer unavailable: {reason}")]
    TracerUnavailable {
        /// Why attachment is not possible.
        reason: String,
    },
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, FlowtraceError>;
