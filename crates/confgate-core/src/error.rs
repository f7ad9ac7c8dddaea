//! # Error Hierarchy
//!
//! Structured error types for confgate, built with `thiserror`.
//! No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! These errors are internal composition currency. The public operations of
//! the schema subsystem (resolve, validate) convert every failure into a
//! return value plus a log entry — no error in this hierarchy crosses
//! their public boundary.

use thiserror::Error;

/// Top-level error type for the confgate stack.
#[derive(Error, Debug)]
pub enum ConfgateError {
    /// The configuration document could not be read from disk.
    #[error("cannot read configuration at {path}: {source}")]
    ConfigRead {
        /// Path to the configuration file.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
