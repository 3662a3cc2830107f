// SPDX-FileCopyrightText: 2026 LLM Router Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the llm-router configuration system.

use std::io::Write;

use llm_router_config::diagnostic::ConfigError;
use llm_router_config::model::{RouterConfig, DEFAULT_HOST};
use llm_router_config::{
    load_and_validate_path, load_and_validate_str, load_config_from_path, load_config_from_str,
};
use serial_test::serial;

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_router_config() {
    let toml = r#"
[backend]
host = "http://gpu-box:11434"
stream = false
timeout_secs = 30

[routing]
summarization_model = "llama3.1"
coding_model = "deepseek-coder"
default_model = "mistral"
force_model = "phi3"

[classifier]
instruction_window = 500

[logging]
level = "debug"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.backend.host, "http://gpu-box:11434");
    assert!(!config.backend.stream);
    assert_eq!(config.backend.timeout_secs, Some(30));
    assert_eq!(config.routing.summarization_model, "llama3.1");
    assert_eq!(config.routing.coding_model, "deepseek-coder");
    assert_eq!(config.routing.default_model, "mistral");
    assert_eq!(config.routing.force_model.as_deref(), Some("phi3"));
    assert_eq!(config.classifier.instruction_window, Some(500));
    assert_eq!(config.logging.level, "debug");
}

/// Missing optional sections use defaults without error.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.backend.host, DEFAULT_HOST);
    assert_eq!(config.backend.host, "http://localhost:11434");
    assert!(config.backend.stream);
    assert!(config.backend.timeout_secs.is_none());
    assert_eq!(config.routing.summarization_model, "gpt-oss");
    assert_eq!(config.routing.coding_model, "qwen2.5-coder");
    assert_eq!(config.routing.default_model, "qwen2.5-coder");
    assert!(config.routing.force_model.is_none());
    assert!(config.classifier.instruction_window.is_none());
    assert_eq!(config.logging.level, "warn");
}

/// Partial sections keep defaults for the fields they omit.
#[test]
fn partial_section_keeps_other_defaults() {
    let toml = r#"
[routing]
coding_model = "codellama"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.routing.coding_model, "codellama");
    assert_eq!(config.routing.summarization_model, "gpt-oss");
    assert_eq!(config.routing.default_model, "qwen2.5-coder");
}

#[test]
fn unknown_field_in_backend_produces_error() {
    let toml = r#"
[backend]
hots = "http://localhost:11434"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("hots"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// Unexpected top-level section is rejected by deny_unknown_fields.
#[test]
fn deny_unknown_fields_at_top_level() {
    let toml = r#"
[telemetry]
enabled = true
"#;

    let err = load_config_from_str(toml).expect_err("unknown top-level section should be rejected");
    let err_str = format!("{err}");
    assert!(
        err_str.contains("unknown field") || err_str.contains("telemetry"),
        "error should mention unknown field, got: {err_str}"
    );
}

/// The serde model accepts the same TOML as the figment loader.
#[test]
fn toml_crate_round_trip_matches_loader() {
    let toml_str = r#"
[routing]
force_model = "phi3"
"#;
    let direct: RouterConfig = toml::from_str(toml_str).unwrap();
    let loaded = load_config_from_str(toml_str).unwrap();
    assert_eq!(direct.routing.force_model, loaded.routing.force_model);
    assert_eq!(direct.backend.host, loaded.backend.host);
}

// ============================================================================
// Diagnostics
// ============================================================================

#[test]
fn diagnostic_error_includes_unknown_key_and_suggestion() {
    let toml = r#"
[backend]
hots = "http://localhost:11434"
"#;

    let errors = load_and_validate_str(toml).expect_err("should produce errors");
    let has_unknown_key = errors.iter().any(|e| {
        matches!(e, ConfigError::UnknownKey { key, suggestion, valid_keys, .. } if {
            key == "hots"
                && suggestion.as_deref() == Some("host")
                && valid_keys.contains("timeout_secs")
        })
    });
    assert!(
        has_unknown_key,
        "should have UnknownKey error for 'hots' with suggestion 'host', got: {errors:?}"
    );
}

#[test]
fn diagnostic_invalid_type_names_key() {
    let toml = r#"
[backend]
timeout_secs = "soon"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject invalid type");
    assert!(
        errors.iter().any(|e| matches!(e, ConfigError::InvalidType { key, .. } if key.contains("timeout_secs"))),
        "got: {errors:?}"
    );
}

#[test]
fn config_error_renders_with_miette() {
    use miette::{Diagnostic, GraphicalReportHandler};

    let error = ConfigError::UnknownKey {
        key: "hots".to_string(),
        suggestion: Some("host".to_string()),
        valid_keys: "host, stream, timeout_secs".to_string(),
        span: None,
        src: None,
    };

    assert!(error.code().is_some(), "should have diagnostic code");
    let help = error.help().expect("should have help text").to_string();
    assert!(help.contains("did you mean `host`"), "got: {help}");

    let mut buf = String::new();
    GraphicalReportHandler::new()
        .render_report(&mut buf, &error)
        .expect("should render without error");
    assert!(buf.contains("hots"), "rendered report should mention the key");
}

#[test]
fn validation_errors_surface_from_load_and_validate_str() {
    let toml = r#"
[backend]
host = "ftp://localhost"

[logging]
level = "chatty"
"#;

    let errors = load_and_validate_str(toml).expect_err("invalid values should fail");
    assert_eq!(errors.len(), 2, "got: {errors:?}");
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

// ============================================================================
// File and environment layering
// ============================================================================

#[test]
#[serial]
fn explicit_config_file_is_loaded() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[routing]\nsummarization_model = \"llama3.2\"").unwrap();

    let config = load_and_validate_path(file.path()).expect("file should load");
    assert_eq!(config.routing.summarization_model, "llama3.2");
}

#[test]
fn missing_explicit_config_file_is_an_error() {
    let errors = load_and_validate_path(std::path::Path::new("/nonexistent/llm-router.toml"))
        .expect_err("missing file should be reported");
    assert!(matches!(&errors[0], ConfigError::Other(msg) if msg.contains("does not exist")));
}

#[test]
#[serial]
fn env_var_overrides_file_value() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backend]\nhost = \"http://from-file:11434\"").unwrap();

    // SAFETY: tests touching the environment are serialized.
    unsafe {
        std::env::set_var("LLM_ROUTER_BACKEND_HOST", "http://from-env:11434");
        std::env::set_var("LLM_ROUTER_ROUTING_CODING_MODEL", "starcoder2");
    }
    let result = load_config_from_path(file.path());
    unsafe {
        std::env::remove_var("LLM_ROUTER_BACKEND_HOST");
        std::env::remove_var("LLM_ROUTER_ROUTING_CODING_MODEL");
    }

    let config = result.expect("env override should merge");
    assert_eq!(config.backend.host, "http://from-env:11434");
    assert_eq!(config.routing.coding_model, "starcoder2");
}

/// Dotted keys override nested fields the same way the env provider does.
#[test]
fn dotted_override_sets_nested_field() {
    use figment::{providers::Serialized, Figment};

    let config: RouterConfig = Figment::new()
        .merge(Serialized::defaults(RouterConfig::default()))
        .merge(("routing.default_model", "mistral"))
        .extract()
        .expect("should set default_model via dot notation");

    assert_eq!(config.routing.default_model, "mistral");
}

#[test]
#[serial]
fn load_and_validate_defaults() {
    let config = llm_router_config::load_and_validate().expect("defaults should validate");
    assert!(!config.routing.coding_model.is_empty());
}

/// Semantic problems are left for the caller when loading without validation.
#[test]
#[serial]
fn load_with_diagnostics_skips_validation() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backend]\nhost = \"ftp://nas:21\"").unwrap();

    let config = llm_router_config::load_with_diagnostics(Some(file.path()))
        .expect("parse succeeds without validation");
    assert_eq!(config.backend.host, "ftp://nas:21");
    assert!(llm_router_config::validation::validate_config(&config).is_err());

    let errors = load_and_validate_path(file.path()).expect_err("validation rejects ftp");
    assert!(matches!(&errors[0], ConfigError::Validation { message } if message.contains("backend.host")));
}

#[test]
#[serial]
fn load_with_diagnostics_reports_parse_errors() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[backend]\nhots = \"http://x:1\"").unwrap();

    let errors = llm_router_config::load_with_diagnostics(Some(file.path()))
        .expect_err("unknown key is a parse error");
    assert!(matches!(&errors[0], ConfigError::UnknownKey { .. }));
}
