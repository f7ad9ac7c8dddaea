#![deny(missing_docs)]

//! # confgate-core — Foundational Types for Confgate
//!
//! This crate defines the types every other crate in the workspace depends
//! on. It has no internal crate dependencies — only `serde`, `serde_json`,
//! and `thiserror` from the external ecosystem.
//!
//! ## Design Principles
//!
//! 1. **The configuration document is opaque.** Confgate interprets exactly
//!    one field of a runtime configuration: the `$schema` reference. All
//!    other content rides along untouched so the original document
//!    round-trips byte-for-byte semantically.
//!
//! 2. **[`ConfgateError`] hierarchy.** Structured errors with `thiserror` —
//!    no `Box<dyn Error>`, no `.unwrap()` outside tests.

pub mod config;
pub mod error;

// Re-export primary types at crate root for ergonomic imports.
pub use config::{RuntimeConfig, DEFAULT_SCHEMA_URL, SCHEMA_FILE_NAME};
pub use error::ConfgateError;
