//! # Schema Validator
//!
//! Validates a runtime configuration document against JSON Schema text,
//! producing a [`SchemaValidationResult`] that the caller inspects instead
//! of catching errors.
//!
//! ## Failure Discipline
//!
//! Every failure raised by the underlying `jsonschema` capability is
//! caught at this boundary. A malformed schema, an uncompilable schema,
//! and a configuration that is not JSON at all are *infrastructure*
//! failures: the result is invalid with `errors` absent. A configuration
//! that parses but breaks schema constraints is a *content* failure: the
//! result is invalid with a non-empty violation list. Callers treat
//! `is_valid == false` uniformly but may distinguish the two by checking
//! whether violations are present.

use std::fmt;

use serde_json::Value;

/// A single reported mismatch between the configuration and a schema
/// constraint. Pass-through diagnostic data from the validation engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    /// JSON Pointer path to the violating field in the configuration.
    pub instance_path: String,
    /// JSON Pointer path within the schema that triggered the violation.
    pub schema_path: String,
    /// Human-readable description of the violation.
    pub message: String,
}

impl fmt::Display for SchemaViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.instance_path.is_empty() {
            write!(f, "  (root): {}", self.message)
        } else {
            write!(f, "  {}: {}", self.instance_path, self.message)
        }
    }
}

/// Outcome of validating a configuration document against a schema.
///
/// Immutable; constructed per validation call through [`valid`](Self::valid),
/// [`invalid`](Self::invalid), or [`indeterminate`](Self::indeterminate),
/// which enforce the invariants: `errors` is `Some` only when the result
/// is invalid, and a valid result never carries errors.
#[derive(Debug, Clone)]
pub struct SchemaValidationResult {
    is_valid: bool,
    errors: Option<Vec<SchemaViolation>>,
}

impl SchemaValidationResult {
    /// The configuration satisfies every schema constraint.
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: None,
        }
    }

    /// The configuration breaks schema constraints.
    ///
    /// An empty violation list carries no content diagnosis and collapses
    /// to [`indeterminate`](Self::indeterminate).
    pub fn invalid(errors: Vec<SchemaViolation>) -> Self {
        if errors.is_empty() {
            return Self::indeterminate();
        }
        Self {
            is_valid: false,
            errors: Some(errors),
        }
    }

    /// Validation could not be performed: the schema (or the document
    /// itself) was unusable. Distinguishable from a content failure only
    /// by the absence of violations.
    pub fn indeterminate() -> Self {
        Self {
            is_valid: false,
            errors: None,
        }
    }

    /// Whether the configuration satisfied the schema.
    pub fn is_valid(&self) -> bool {
        self.is_valid
    }

    /// The violations, present only for a content failure.
    pub fn errors(&self) -> Option<&[SchemaViolation]> {
        self.errors.as_deref()
    }

    /// Number of violations (zero for valid and indeterminate results).
    pub fn error_count(&self) -> usize {
        self.errors.as_ref().map_or(0, Vec::len)
    }

    /// True when validation failed without producing violations — an
    /// infrastructure failure rather than a content mismatch.
    pub fn is_indeterminate(&self) -> bool {
        !self.is_valid && self.errors.is_none()
    }
}

impl fmt::Display for SchemaValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_valid {
            return write!(f, "configuration satisfies the schema requirements");
        }
        match &self.errors {
            None => write!(f, "validation could not be performed"),
            Some(errors) => {
                writeln!(f, "{} schema violation(s):", errors.len())?;
                for (i, v) in errors.iter().enumerate() {
                    if i > 0 {
                        writeln!(f)?;
                    }
                    write!(f, "{v}")?;
                }
                Ok(())
            }
        }
    }
}

/// Validates configuration text against schema text.
///
/// Stateless and pure with respect to its inputs aside from logging; it
/// performs no I/O and caches nothing across calls. Safe to share and to
/// invoke concurrently.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConfigSchemaValidator;

impl ConfigSchemaValidator {
    /// Create a validator.
    pub fn new() -> Self {
        Self
    }

    /// Validate `instance_text` (a serialized configuration document)
    /// against `schema_text` (a JSON Schema document).
    ///
    /// Never panics and never returns an error: every failure mode is
    /// folded into the returned [`SchemaValidationResult`].
    pub fn validate(&self, schema_text: &str, instance_text: &str) -> SchemaValidationResult {
        let schema_value: Value = match serde_json::from_str(schema_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "failed to parse schema text; validation is indeterminate");
                return SchemaValidationResult::indeterminate();
            }
        };

        let validator = match jsonschema::validator_for(&schema_value) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "failed to compile schema; validation is indeterminate");
                return SchemaValidationResult::indeterminate();
            }
        };

        let instance: Value = match serde_json::from_str(instance_text) {
            Ok(v) => v,
            Err(e) => {
                tracing::error!(error = %e, "configuration is not valid JSON; validation is indeterminate");
                return SchemaValidationResult::indeterminate();
            }
        };

        let violations: Vec<SchemaViolation> = validator
            .iter_errors(&instance)
            .map(|e| SchemaViolation {
                instance_path: e.instance_path.to_string(),
                schema_path: e.schema_path.to_string(),
                message: e.to_string(),
            })
            .collect();

        if violations.is_empty() {
            tracing::info!("configuration satisfies the schema requirements");
            SchemaValidationResult::valid()
        } else {
            SchemaValidationResult::invalid(violations)
        }
    }
}
