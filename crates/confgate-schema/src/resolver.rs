//! # Schema Resolver
//!
//! Decides the textual content of the authoritative schema for a runtime
//! configuration document.
//!
//! ## Resolution Order
//!
//! 1. The URL pinned in the configuration's `$schema` field, unless it is
//!    absent, blank, or the well-known placeholder — deployments pin a URL
//!    to validate against a specific published schema version.
//! 2. The schema file packaged next to the running binary, so validation
//!    still works offline or when no schema is configured.
//!
//! Each step is a fallible operation returning a `Result`; [`SchemaResolver::resolve`]
//! composes them with short-circuiting on first success, logging every
//! failed attempt. No failure propagates to the caller.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde_json::Value;
use thiserror::Error;
use url::Url;

use confgate_core::{RuntimeConfig, SCHEMA_FILE_NAME};

/// Default timeout for the remote schema fetch.
const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Error during a single schema resolution step.
///
/// These never cross the boundary of [`SchemaResolver::resolve`]; they are
/// surfaced only by the individual step methods for callers that want to
/// run a step directly.
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The configured `$schema` value is not a parseable URL.
    #[error("invalid schema URL \"{url}\": {reason}")]
    InvalidUrl {
        /// The rejected value.
        url: String,
        /// Why it failed to parse.
        reason: String,
    },

    /// HTTP transport error (unreachable host, timeout, TLS failure).
    #[error("HTTP error fetching schema from {url}: {source}")]
    Http {
        /// The URL being fetched.
        url: String,
        /// Underlying transport failure.
        source: reqwest::Error,
    },

    /// The schema endpoint answered with a non-2xx status.
    #[error("schema endpoint {url} returned {status}")]
    Status {
        /// The URL being fetched.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The remote document is not valid JSON or not a usable schema.
    #[error("malformed schema at {url}: {reason}")]
    MalformedSchema {
        /// The URL being fetched.
        url: String,
        /// Parse or compile failure detail.
        reason: String,
    },

    /// The bundled schema resource could not be located or read.
    #[error("cannot read bundled schema at {path}: {source}")]
    Bundled {
        /// Path that was attempted.
        path: String,
        /// Underlying I/O failure.
        source: std::io::Error,
    },

    /// Re-serializing the fetched schema failed.
    #[error("schema serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Resolves the governing schema for a runtime configuration.
///
/// Holds a `reqwest::Client` for the remote fetch and an optional override
/// of the bundled-schema directory. By default the bundled schema is
/// looked up next to the current executable; tests inject a directory via
/// [`SchemaResolver::with_bundled_dir`] instead of relying on process
/// introspection.
#[derive(Debug, Clone)]
pub struct SchemaResolver {
    http: reqwest::Client,
    timeout: Duration,
    bundled_dir: Option<PathBuf>,
}

impl Default for SchemaResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl SchemaResolver {
    /// Create a resolver with the default fetch timeout and the bundled
    /// schema located next to the running executable.
    pub fn new() -> Self {
        Self {
            http: reqwest::Client::new(),
            timeout: Duration::from_secs(DEFAULT_FETCH_TIMEOUT_SECS),
            bundled_dir: None,
        }
    }

    /// Override the directory searched for the bundled schema file.
    #[must_use]
    pub fn with_bundled_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.bundled_dir = Some(dir.into());
        self
    }

    /// Override the remote fetch timeout. A timeout is treated identically
    /// to any other fetch failure: fall through to the bundled schema.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Resolve the schema text governing `config`.
    ///
    /// Tries the pinned URL first (never for placeholder/blank values),
    /// then the bundled fallback. Returns `None` only when neither source
    /// yields a schema. Failures are logged, never raised.
    pub async fn resolve(&self, config: &RuntimeConfig) -> Option<String> {
        if !config.uses_placeholder_schema() {
            if let Some(url) = config.schema() {
                match self.fetch_remote(url).await {
                    Ok(text) => {
                        tracing::info!(url, "resolved schema from configured URL");
                        return Some(text);
                    }
                    Err(e) => {
                        tracing::error!(
                            url,
                            error = %e,
                            "failed to fetch schema from configured URL; falling back to bundled schema"
                        );
                    }
                }
            }
        }

        match self.read_bundled() {
            Ok(text) => {
                tracing::info!("resolved schema from bundled resource");
                Some(text)
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to read bundled schema; no schema available");
                None
            }
        }
    }

    /// Fetch a schema document from `raw_url` and return it re-serialized
    /// as pretty-printed JSON.
    ///
    /// The body must parse as JSON and compile as a JSON Schema; anything
    /// else is a [`ResolveError::MalformedSchema`]. Returning the parsed
    /// document's serialization (rather than the raw body) normalizes
    /// whitespace and guarantees the caller receives well-formed text.
    ///
    /// # Errors
    ///
    /// Any failure along the way: URL parse, transport, non-2xx status,
    /// JSON parse, schema compile.
    pub async fn fetch_remote(&self, raw_url: &str) -> Result<String, ResolveError> {
        let url = Url::parse(raw_url).map_err(|e| ResolveError::InvalidUrl {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        let resp = self
            .http
            .get(url)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| ResolveError::Http {
                url: raw_url.to_string(),
                source: e,
            })?;

        if !resp.status().is_success() {
            return Err(ResolveError::Status {
                url: raw_url.to_string(),
                status: resp.status().as_u16(),
            });
        }

        let body = resp.text().await.map_err(|e| ResolveError::Http {
            url: raw_url.to_string(),
            source: e,
        })?;

        let document: Value =
            serde_json::from_str(&body).map_err(|e| ResolveError::MalformedSchema {
                url: raw_url.to_string(),
                reason: format!("invalid JSON: {e}"),
            })?;

        // Prove the document is a usable schema before handing it out.
        jsonschema::validator_for(&document).map_err(|e| ResolveError::MalformedSchema {
            url: raw_url.to_string(),
            reason: e.to_string(),
        })?;

        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Read the bundled fallback schema: the directory containing the
    /// current executable (or the injected override) joined with
    /// [`SCHEMA_FILE_NAME`]. Raw text is returned as-is.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError::Bundled`] when the executable path cannot
    /// be determined or the file cannot be read.
    pub fn read_bundled(&self) -> Result<String, ResolveError> {
        let dir = match &self.bundled_dir {
            Some(dir) => dir.clone(),
            None => executable_dir()?,
        };
        let path = dir.join(SCHEMA_FILE_NAME);
        std::fs::read_to_string(&path).map_err(|e| ResolveError::Bundled {
            path: path.display().to_string(),
            source: e,
        })
    }
}

/// Directory containing the currently running binary.
fn executable_dir() -> Result<PathBuf, ResolveError> {
    let exe = std::env::current_exe().map_err(|e| ResolveError::Bundled {
        path: "<current executable>".to_string(),
        source: e,
    })?;
    exe.parent().map(Path::to_path_buf).ok_or_else(|| {
        ResolveError::Bundled {
            path: exe.display().to_string(),
            source: std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "executable has no parent directory",
            ),
        }
    })
}
