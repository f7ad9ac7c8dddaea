//! Contract tests for the schema resolver.
//!
//! These tests use wiremock to simulate a remote schema endpoint and
//! tempfile directories to stand in for the directory next to the
//! installed binary. They pin the resolution order: pinned URL first
//! (never for placeholder values), bundled fallback second, `None` only
//! when both fail.

use std::time::Duration;

use serde_json::{json, Map, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use confgate_core::{RuntimeConfig, DEFAULT_SCHEMA_URL, SCHEMA_FILE_NAME};
use confgate_schema::{ConfigSchemaValidator, SchemaResolver};

/// A minimal but real schema used as the remote document.
fn remote_schema() -> Value {
    json!({
        "type": "object",
        "required": ["service"],
        "properties": {
            "service": {"type": "object"}
        }
    })
}

/// Write `content` as the bundled schema in a fresh temp directory.
fn bundled_dir(content: &str) -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("create temp dir");
    std::fs::write(dir.path().join(SCHEMA_FILE_NAME), content).expect("write bundled schema");
    dir
}

fn config_with_schema(schema: Option<&str>) -> RuntimeConfig {
    RuntimeConfig {
        schema: schema.map(str::to_string),
        rest: Map::new(),
    }
}

// ── Step 1: pinned URL ───────────────────────────────────────────────

#[tokio::test]
async fn remote_schema_takes_precedence_over_bundled() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/confgate.draft.schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_schema()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());
    let config = config_with_schema(Some(&format!(
        "{}/confgate.draft.schema.json",
        mock_server.uri()
    )));

    let text = resolver.resolve(&config).await.expect("schema resolved");
    let resolved: Value = serde_json::from_str(&text).expect("resolved text is JSON");
    assert_eq!(resolved, remote_schema());
}

#[tokio::test]
async fn remote_fetch_normalizes_document_text() {
    let mock_server = MockServer::start().await;
    // Unusual whitespace in the served body; the resolver returns the
    // parsed document re-serialized, not the raw bytes.
    let raw_body = "{\"type\":\n\t\"object\"  }";
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string(raw_body))
        .mount(&mock_server)
        .await;

    let resolver = SchemaResolver::new();
    let text = resolver
        .fetch_remote(&format!("{}/schema.json", mock_server.uri()))
        .await
        .expect("fetch succeeds");

    assert_ne!(text, raw_body);
    let value: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(value, json!({"type": "object"}));
}

// ── Placeholder and blank values skip the fetch ──────────────────────

#[tokio::test]
async fn placeholder_sentinel_goes_straight_to_bundled() {
    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new()
        .with_bundled_dir(dir.path())
        // The placeholder must short-circuit before any network I/O; an
        // accidental fetch could not complete within this timeout.
        .with_timeout(Duration::from_millis(1));

    let config = config_with_schema(Some(DEFAULT_SCHEMA_URL));
    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

#[tokio::test]
async fn blank_schema_goes_straight_to_bundled() {
    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());

    for blank in ["", "   ", "\t\n"] {
        let config = config_with_schema(Some(blank));
        let text = resolver.resolve(&config).await.expect("bundled fallback");
        assert!(text.contains("bundled"), "blank value {blank:?} must use bundled schema");
    }
}

#[tokio::test]
async fn absent_schema_goes_straight_to_bundled() {
    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());

    let config = config_with_schema(None);
    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

// ── Step 2: fallback on every remote failure mode ────────────────────

#[tokio::test]
async fn non_2xx_response_falls_back_to_bundled() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());
    let config = config_with_schema(Some(&format!("{}/schema.json", mock_server.uri())));

    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

#[tokio::test]
async fn malformed_remote_json_falls_back_to_bundled() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());
    let config = config_with_schema(Some(&format!("{}/schema.json", mock_server.uri())));

    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

#[tokio::test]
async fn uncompilable_remote_schema_falls_back_to_bundled() {
    let mock_server = MockServer::start().await;
    // Valid JSON, but "type" must be a string or array of strings.
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": 5})))
        .mount(&mock_server)
        .await;

    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());
    let config = config_with_schema(Some(&format!("{}/schema.json", mock_server.uri())));

    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

#[tokio::test]
async fn unreachable_host_falls_back_to_bundled() {
    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new()
        .with_bundled_dir(dir.path())
        .with_timeout(Duration::from_millis(500));

    // Port 9 (discard) is not listening in the test environment.
    let config = config_with_schema(Some("http://127.0.0.1:9/schema.json"));
    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

#[tokio::test]
async fn unparseable_url_falls_back_to_bundled() {
    let dir = bundled_dir(r#"{"type": "object", "title": "bundled"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());

    let config = config_with_schema(Some("::definitely not a url::"));
    let text = resolver.resolve(&config).await.expect("bundled fallback");
    assert!(text.contains("bundled"));
}

// ── Step 3: both sources unavailable ─────────────────────────────────

#[tokio::test]
async fn nothing_available_returns_none() {
    // Empty directory: no bundled schema file.
    let dir = tempfile::tempdir().unwrap();
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());

    let config = config_with_schema(Some(DEFAULT_SCHEMA_URL));
    assert!(resolver.resolve(&config).await.is_none());
}

#[tokio::test]
async fn remote_failure_with_missing_bundled_schema_returns_none() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());
    let config = config_with_schema(Some(&format!("{}/schema.json", mock_server.uri())));

    assert!(resolver.resolve(&config).await.is_none());
}

// ── Resolve + validate, end to end ───────────────────────────────────

#[tokio::test]
async fn resolved_remote_schema_drives_validation() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/schema.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(remote_schema()))
        .mount(&mock_server)
        .await;

    let dir = bundled_dir(r#"{"type": "object"}"#);
    let resolver = SchemaResolver::new().with_bundled_dir(dir.path());

    let raw_config = format!(
        r#"{{"$schema": "{}/schema.json", "telemetry": true}}"#,
        mock_server.uri()
    );
    let config = RuntimeConfig::from_json(&raw_config).unwrap();

    let schema_text = resolver.resolve(&config).await.expect("schema resolved");
    let result = ConfigSchemaValidator::new().validate(&schema_text, &raw_config);

    // The remote schema requires a "service" object; this config lacks one.
    assert!(!result.is_valid());
    let errors = result.errors().expect("content failure carries violations");
    assert!(errors.iter().any(|v| v.message.contains("service")));
}
