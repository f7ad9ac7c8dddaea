//! Runtime configuration document model.
//!
//! A runtime configuration is a JSON document whose shape is governed by a
//! JSON Schema. The document may name that schema itself via a `$schema`
//! property; generated configs carry a well-known placeholder value there
//! until an operator pins a real published schema.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::ConfgateError;

/// Placeholder `$schema` value written into generated configuration files.
///
/// The version segment is left unexpanded (`vmajor.minor.patch`), so this
/// URL never points at a published schema document. A configuration
/// carrying exactly this value (case-sensitive) is treated as having no
/// real schema configured.
pub const DEFAULT_SCHEMA_URL: &str =
    "https://github.com/confgate/confgate/releases/download/vmajor.minor.patch/confgate.draft.schema.json";

/// Filename of the schema resource packaged next to the installed binary.
pub const SCHEMA_FILE_NAME: &str = "confgate.draft.schema.json";

/// A runtime configuration document.
///
/// Only the `$schema` reference is interpreted by confgate. The rest of
/// the document is carried verbatim in [`RuntimeConfig::rest`] so that
/// serializing the struct reproduces the original content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RuntimeConfig {
    /// Optional reference to the JSON Schema governing this document.
    #[serde(rename = "$schema", default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Remaining document content, untouched.
    #[serde(flatten)]
    pub rest: Map<String, Value>,
}

impl RuntimeConfig {
    /// Parse a configuration document from raw JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfgateError::Json`] when the text is not a JSON object.
    pub fn from_json(text: &str) -> Result<Self, ConfgateError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load and parse a configuration document from a file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfgateError::ConfigRead`] when the file cannot be read
    /// and [`ConfgateError::Json`] when its content is not valid JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfgateError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| ConfgateError::ConfigRead {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_json(&text)
    }

    /// The configured schema reference, if any.
    pub fn schema(&self) -> Option<&str> {
        self.schema.as_deref()
    }

    /// True when no real schema is configured: the `$schema` reference is
    /// absent, blank, or exactly the [`DEFAULT_SCHEMA_URL`] placeholder.
    pub fn uses_placeholder_schema(&self) -> bool {
        match self.schema.as_deref() {
            None => true,
            Some(s) => s.trim().is_empty() || s == DEFAULT_SCHEMA_URL,
        }
    }
}
