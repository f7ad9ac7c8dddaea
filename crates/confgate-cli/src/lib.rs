//! # confgate-cli — CLI Tool for Confgate
//!
//! Provides the `confgate` command-line interface.
//!
//! ## Subcommands
//!
//! - `confgate validate` — Check a runtime configuration file against its
//!   governing JSON Schema.
//!
//! ## Exit Codes
//!
//! - `0` — the configuration satisfies the schema.
//! - `1` — the configuration violates the schema, or no schema could be
//!   obtained.
//! - `2` — operational error (unreadable or unparseable configuration).

pub mod validate;
