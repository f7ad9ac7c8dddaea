//! # Validate Subcommand
//!
//! Checks a runtime configuration file against its governing JSON Schema:
//! resolves the schema (pinned URL or bundled fallback), validates the
//! raw configuration text, and reports each violation on its own line.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use confgate_core::RuntimeConfig;
use confgate_schema::{ConfigSchemaValidator, SchemaResolver};

/// Arguments for the `confgate validate` subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the runtime configuration file to validate.
    #[arg(value_name = "CONFIG")]
    pub config: PathBuf,

    /// Directory containing the bundled fallback schema. Defaults to the
    /// directory of the running executable.
    #[arg(long, value_name = "DIR")]
    pub schema_dir: Option<PathBuf>,

    /// Validate against this schema URL instead of the one referenced by
    /// the configuration's `$schema` field.
    #[arg(long, value_name = "URL")]
    pub schema_url: Option<String>,
}

/// Execute the validate subcommand.
///
/// Returns exit code: 0 on success, 1 on validation failure or when no
/// schema could be obtained. Operational errors (unreadable or
/// unparseable configuration) are returned as `Err` and mapped to exit
/// code 2 by `main`.
pub async fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let raw = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read configuration at {}", args.config.display()))?;

    let mut config = RuntimeConfig::from_json(&raw)
        .with_context(|| format!("configuration at {} is not valid JSON", args.config.display()))?;

    if let Some(ref url) = args.schema_url {
        config.schema = Some(url.clone());
    }

    let mut resolver = SchemaResolver::new();
    if let Some(ref dir) = args.schema_dir {
        resolver = resolver.with_bundled_dir(dir);
    }

    let Some(schema_text) = resolver.resolve(&config).await else {
        println!(
            "FAIL: {} — no schema could be obtained (neither the configured URL nor the bundled schema is available)",
            args.config.display()
        );
        return Ok(1);
    };

    let result = ConfigSchemaValidator::new().validate(&schema_text, &raw);

    if result.is_valid() {
        println!("OK: {}", args.config.display());
        Ok(0)
    } else if result.is_indeterminate() {
        println!(
            "FAIL: {} — validation could not be performed (malformed schema or configuration)",
            args.config.display()
        );
        Ok(1)
    } else {
        println!("FAIL: {} — {}", args.config.display(), result);
        Ok(1)
    }
}
