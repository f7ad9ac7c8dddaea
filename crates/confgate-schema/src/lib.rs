//! # confgate-schema — Schema Resolution & Validation
//!
//! This crate decides which JSON Schema governs a runtime configuration
//! document and validates the document against it.
//!
//! ## Responsibilities
//!
//! - **Resolution:** Prefer the schema URL pinned in the configuration's
//!   own `$schema` field; fall back to the schema packaged next to the
//!   running binary; report "no schema" only when both are unavailable.
//! - **Validation:** Compile schema text with the `jsonschema` crate and
//!   collect structured violations for a configuration document.
//!
//! ## Failure Discipline
//!
//! Schema retrieval and validation are advisory infrastructure: no failure
//! in either operation may abort the host process. Every fallible step
//! returns a `Result` internally, and the public operations convert each
//! failure into a value — `None` from the resolver, an indeterminate
//! [`SchemaValidationResult`] from the validator — plus an error-level log
//! entry. Callers decide whether to abort startup or proceed with warnings.

pub mod resolver;
pub mod validate;

// Re-export primary types.
pub use resolver::{ResolveError, SchemaResolver};
pub use validate::{ConfigSchemaValidator, SchemaValidationResult, SchemaViolation};
